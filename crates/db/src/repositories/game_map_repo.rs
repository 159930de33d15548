//! Repository for the `game_maps` table.

use mapboard_core::dimensions::ImageDimensions;
use mapboard_core::map_query::{MapFilter, MapSort};
use mapboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::game_map::{CreateGameMap, GameMap, UpdateGameMap};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_path, width, height, mode, created_by, created_at";

/// Provides CRUD and list operations for game maps.
pub struct GameMapRepo;

impl GameMapRepo {
    /// Insert a new map, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGameMap) -> Result<GameMap, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_maps (name, image_path, width, height, mode, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameMap>(&query)
            .bind(&input.name)
            .bind(&input.image_path)
            .bind(input.dimensions.width)
            .bind(input.dimensions.height)
            .bind(input.mode.as_str())
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a map by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GameMap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_maps WHERE id = $1");
        sqlx::query_as::<_, GameMap>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List maps matching `filter`, ordered by `sort`.
    ///
    /// The name filter is a case-insensitive substring match; the mode
    /// filter is an exact match on the stored tag.
    pub async fn list(
        pool: &PgPool,
        filter: &MapFilter,
        sort: MapSort,
    ) -> Result<Vec<GameMap>, sqlx::Error> {
        let search_pattern = filter.search_pattern();

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if search_pattern.is_some() {
            conditions.push(format!("name ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.mode.is_some() {
            conditions.push(format!("mode = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM game_maps {where_clause} ORDER BY {}",
            sort.order_clause()
        );

        let mut q = sqlx::query_as::<_, GameMap>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref pattern) = search_pattern {
            q = q.bind(pattern);
        }
        if let Some(ref mode) = filter.mode {
            q = q.bind(mode);
        }

        q.fetch_all(pool).await
    }

    /// List every map in ID order. Used by the dimension resync.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<GameMap>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_maps ORDER BY id ASC");
        sqlx::query_as::<_, GameMap>(&query).fetch_all(pool).await
    }

    /// Update a map. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGameMap,
    ) -> Result<Option<GameMap>, sqlx::Error> {
        let query = format!(
            "UPDATE game_maps SET
                name = COALESCE($2, name),
                mode = COALESCE($3, mode),
                image_path = COALESCE($4, image_path),
                width = COALESCE($5, width),
                height = COALESCE($6, height)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameMap>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.mode.map(|m| m.as_str()))
            .bind(input.image_path.as_deref())
            .bind(input.dimensions.map(|d| d.width))
            .bind(input.dimensions.map(|d| d.height))
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a map's stored dimensions. Returns `true` if a row changed.
    pub async fn update_dimensions(
        pool: &PgPool,
        id: DbId,
        dimensions: ImageDimensions,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE game_maps SET width = $2, height = $3
             WHERE id = $1 AND (width <> $2 OR height <> $3)",
        )
        .bind(id)
        .bind(dimensions.width)
        .bind(dimensions.height)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a map by ID. Its drawings are removed by `ON DELETE CASCADE`.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM game_maps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
