//! Handlers for map drawings.
//!
//! Drawings are nested under maps: `/maps/{map_id}/drawings[/{id}]`.
//! They are append/delete only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mapboard_core::drawing::{
    tool_choices, validate_color_hex, validate_label, DrawingToolType, ToolChoice,
};
use mapboard_core::error::CoreError;
use mapboard_core::types::DbId;
use mapboard_db::models::map_drawing::{CreateMapDrawing, MapDrawing};
use mapboard_db::repositories::MapDrawingRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::maps::find_map;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/maps/{map_id}/drawings
///
/// Overlay read for the client-side renderer, newest first.
pub async fn list_by_map(
    State(state): State<AppState>,
    Path(map_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MapDrawing>>>> {
    find_map(&state, map_id).await?;
    let drawings = MapDrawingRepo::list_by_map(&state.pool, map_id).await?;
    Ok(Json(DataResponse { data: drawings }))
}

/// POST /api/v1/maps/{map_id}/drawings
///
/// The coordinates payload is stored as given; only the tool type, color
/// and label are checked.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(map_id): Path<DbId>,
    Json(input): Json<CreateMapDrawing>,
) -> AppResult<(StatusCode, Json<DataResponse<MapDrawing>>)> {
    DrawingToolType::from_str(&input.tool_type)?;
    if let Some(ref color) = input.color {
        validate_color_hex(color)?;
    }
    validate_label(input.label.as_deref())?;

    find_map(&state, map_id).await?;

    let drawing = MapDrawingRepo::create(&state.pool, map_id, Some(user.user_id), &input).await?;
    tracing::debug!(
        drawing_id = drawing.id,
        map_id,
        tool = %drawing.tool_type,
        "Drawing created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: drawing })))
}

/// DELETE /api/v1/maps/{map_id}/drawings/{id}
///
/// Allowed for the drawing's author, the map's owner, or an admin.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((map_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "MapDrawing",
            id,
        })
    };

    let drawing = MapDrawingRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|d| d.game_map_id == map_id)
        .ok_or_else(not_found)?;
    let map = find_map(&state, map_id).await?;
    user.ensure_can_modify(&[drawing.created_by, Some(map.created_by)])?;

    if MapDrawingRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}

/// GET /api/v1/tools
pub async fn list_tools() -> Json<DataResponse<Vec<ToolChoice>>> {
    Json(DataResponse {
        data: tool_choices(),
    })
}
