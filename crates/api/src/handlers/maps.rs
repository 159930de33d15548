//! Handlers for the `/maps` resource.
//!
//! Map images arrive as multipart uploads. Their pixel dimensions are read
//! from the in-memory payload before the unchanged bytes are written to the
//! asset store; a bad image never fails the request and falls back to the
//! default dimensions instead.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mapboard_core::dimensions::detect_dimensions;
use mapboard_core::error::CoreError;
use mapboard_core::game_map::{
    mode_choices, validate_map_name, GameMode, ModeChoice, MAP_IMAGE_DIR,
};
use mapboard_core::map_query::{MapFilter, MapSort, DEFAULT_SORT};
use mapboard_core::types::DbId;
use mapboard_db::models::game_map::{CreateGameMap, GameMap, UpdateGameMap};
use mapboard_db::repositories::GameMapRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::MapListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// URL prefix the asset store is served under.
pub const MEDIA_URL_PREFIX: &str = "/media";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A map as presented to clients: the stored row plus display data.
#[derive(Debug, Serialize)]
pub struct MapView {
    #[serde(flatten)]
    pub map: GameMap,
    pub mode_label: String,
    pub mode_icon: &'static str,
    /// Public URL of the map image, if the map has one.
    pub image_url: Option<String>,
    /// Endpoint the client-side renderer loads the overlay drawings from.
    pub drawings_url: String,
}

impl From<GameMap> for MapView {
    fn from(map: GameMap) -> Self {
        let (mode_label, mode_icon) = match map.game_mode() {
            Ok(mode) => (mode.label().to_string(), mode.icon()),
            Err(_) => (map.mode.clone(), ""),
        };
        let image_url = map
            .has_image()
            .then(|| format!("{MEDIA_URL_PREFIX}/{}", map.image_path));
        let drawings_url = format!("/api/v1/maps/{}/drawings", map.id);
        Self {
            map,
            mode_label,
            mode_icon,
            image_url,
            drawings_url,
        }
    }
}

/// The map list document: matching maps plus the echoed query.
#[derive(Debug, Serialize)]
pub struct MapListResponse {
    pub data: Vec<MapView>,
    pub search_query: String,
    pub mode_filter: String,
    pub sort_by: String,
    pub mode_choices: Vec<ModeChoice>,
    pub total_maps: usize,
}

// ---------------------------------------------------------------------------
// Multipart form
// ---------------------------------------------------------------------------

/// An uploaded file held in memory.
struct Upload {
    file_name: String,
    data: Vec<u8>,
}

/// Fields of the map create/edit form. All optional at parse time.
#[derive(Default)]
struct MapForm {
    name: Option<String>,
    mode: Option<String>,
    image: Option<Upload>,
}

impl MapForm {
    /// Read `name`, `mode` and `image` fields, ignoring anything else.
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = MapForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "name" => {
                    let text = field.text().await?;
                    form.name = Some(text.trim().to_string());
                }
                "mode" => {
                    let text = field.text().await?;
                    form.mode = Some(text.trim().to_string());
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or("upload").to_string();
                    let data = field.bytes().await?;
                    if !data.is_empty() {
                        form.image = Some(Upload {
                            file_name,
                            data: data.to_vec(),
                        });
                    }
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }
}

/// Parse an optional mode field. Blank means "not given".
fn parse_mode(raw: Option<&str>) -> AppResult<Option<GameMode>> {
    match raw {
        Some(s) if !s.is_empty() => Ok(Some(GameMode::from_str(s)?)),
        _ => Ok(None),
    }
}

/// Load a map or fail with 404.
pub(crate) async fn find_map(state: &AppState, id: DbId) -> AppResult<GameMap> {
    GameMapRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GameMap",
            id,
        }))
}

/// Remove an asset that is no longer referenced. Failures are logged only.
async fn discard_asset(state: &AppState, path: &str) {
    if path.is_empty() {
        return;
    }
    if let Err(e) = state.assets.delete(path).await {
        tracing::warn!(path, error = %e, "Failed to remove unreferenced map image");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/maps?search=&mode=&sort=
///
/// `search` is a case-insensitive substring of the name, `mode` an exact
/// mode tag, and `sort` one of `name` (default), `newest`, `oldest`. Any
/// other sort value leaves the list in storage order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MapListParams>,
) -> AppResult<Json<MapListResponse>> {
    let search_query = params.search.unwrap_or_default();
    let mode_filter = params.mode.unwrap_or_default();
    let sort_by = params.sort.unwrap_or_else(|| DEFAULT_SORT.to_string());

    let filter = MapFilter::new(Some(search_query.as_str()), Some(mode_filter.as_str()));
    let maps = GameMapRepo::list(&state.pool, &filter, MapSort::parse(&sort_by)).await?;
    let data: Vec<MapView> = maps.into_iter().map(MapView::from).collect();

    Ok(Json(MapListResponse {
        total_maps: data.len(),
        data,
        search_query,
        mode_filter,
        sort_by,
        mode_choices: mode_choices(),
    }))
}

/// GET /api/v1/maps/{id}
///
/// Drawings are not embedded; the client loads them from `drawings_url`.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MapView>>> {
    let map = find_map(&state, id).await?;
    Ok(Json(DataResponse {
        data: MapView::from(map),
    }))
}

/// POST /api/v1/maps
///
/// Multipart form with required `name` and `image` fields and an optional
/// `mode` (default `random`). The owner is the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MapView>>)> {
    let form = MapForm::read(multipart).await?;

    let name = form
        .name
        .ok_or_else(|| AppError::BadRequest("Missing required 'name' field".into()))?;
    validate_map_name(&name)?;
    let mode = parse_mode(form.mode.as_deref())?.unwrap_or_default();
    let upload = form
        .image
        .ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;

    let dimensions = detect_dimensions(&upload.data);
    let image_path = state
        .assets
        .put(MAP_IMAGE_DIR, &upload.file_name, &upload.data)
        .await?;

    let input = CreateGameMap {
        name,
        image_path,
        dimensions,
        mode,
        created_by: user.user_id,
    };
    let map = match GameMapRepo::create(&state.pool, &input).await {
        Ok(map) => map,
        Err(e) => {
            discard_asset(&state, &input.image_path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        map_id = map.id,
        user_id = user.user_id,
        dimensions = %dimensions,
        "Map created",
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MapView::from(map),
        }),
    ))
}

/// PUT /api/v1/maps/{id}
///
/// Multipart form; every field is optional. A new `image` replaces the old
/// one and re-derives the stored dimensions. Owner or admin only.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<MapView>>> {
    let existing = find_map(&state, id).await?;
    user.ensure_can_modify(&[Some(existing.created_by)])?;

    let form = MapForm::read(multipart).await?;

    let name = form.name.filter(|n| !n.is_empty());
    if let Some(ref name) = name {
        validate_map_name(name)?;
    }
    let mode = parse_mode(form.mode.as_deref())?;

    let mut input = UpdateGameMap {
        name,
        mode,
        ..Default::default()
    };
    if let Some(upload) = form.image {
        input.dimensions = Some(detect_dimensions(&upload.data));
        input.image_path = Some(
            state
                .assets
                .put(MAP_IMAGE_DIR, &upload.file_name, &upload.data)
                .await?,
        );
    }

    let updated = match GameMapRepo::update(&state.pool, id, &input).await {
        Ok(Some(map)) => map,
        Ok(None) => {
            if let Some(ref path) = input.image_path {
                discard_asset(&state, path).await;
            }
            return Err(AppError::Core(CoreError::NotFound {
                entity: "GameMap",
                id,
            }));
        }
        Err(e) => {
            if let Some(ref path) = input.image_path {
                discard_asset(&state, path).await;
            }
            return Err(e.into());
        }
    };

    if input.image_path.is_some() {
        discard_asset(&state, &existing.image_path).await;
    }

    tracing::info!(map_id = id, user_id = user.user_id, "Map updated");
    Ok(Json(DataResponse {
        data: MapView::from(updated),
    }))
}

/// DELETE /api/v1/maps/{id}
///
/// Removes the map together with all of its drawings. Owner or admin only.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_map(&state, id).await?;
    user.ensure_can_modify(&[Some(existing.created_by)])?;

    if !GameMapRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GameMap",
            id,
        }));
    }
    discard_asset(&state, &existing.image_path).await;

    tracing::info!(map_id = id, user_id = user.user_id, "Map deleted");
    Ok(StatusCode::NO_CONTENT)
}
