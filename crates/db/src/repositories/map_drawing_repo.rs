//! Repository for the `map_drawings` table.
//!
//! Drawings are append/delete only; there is no update.

use mapboard_core::drawing::DEFAULT_DRAWING_COLOR;
use mapboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::map_drawing::{CreateMapDrawing, MapDrawing};

/// Column list for map_drawings queries.
const COLUMNS: &str =
    "id, game_map_id, tool_type, color, coordinates, label, created_at, created_by";

/// Provides create/list/delete operations for map drawings.
pub struct MapDrawingRepo;

impl MapDrawingRepo {
    /// Create a new drawing on `game_map_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        game_map_id: DbId,
        created_by: Option<DbId>,
        input: &CreateMapDrawing,
    ) -> Result<MapDrawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO map_drawings
                (game_map_id, tool_type, color, coordinates, label, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MapDrawing>(&query)
            .bind(game_map_id)
            .bind(&input.tool_type)
            .bind(input.color.as_deref().unwrap_or(DEFAULT_DRAWING_COLOR))
            .bind(&input.coordinates)
            .bind(input.label.as_deref())
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a drawing by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MapDrawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM map_drawings WHERE id = $1");
        sqlx::query_as::<_, MapDrawing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drawings on a map, newest first.
    pub async fn list_by_map(
        pool: &PgPool,
        game_map_id: DbId,
    ) -> Result<Vec<MapDrawing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM map_drawings
             WHERE game_map_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MapDrawing>(&query)
            .bind(game_map_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a drawing by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM map_drawings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
