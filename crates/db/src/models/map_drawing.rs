//! Map drawing model and DTOs.

use mapboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `map_drawings` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MapDrawing {
    pub id: DbId,
    pub game_map_id: DbId,
    pub tool_type: String,
    pub color: String,
    /// Geometry payload; its shape depends on `tool_type` and is only
    /// interpreted by the client.
    pub coordinates: serde_json::Value,
    pub label: Option<String>,
    pub created_at: Timestamp,
    /// `None` once the authoring user has been deleted.
    pub created_by: Option<DbId>,
}

/// DTO for creating a new drawing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMapDrawing {
    pub tool_type: String,
    /// Defaults to `#ff0000` when omitted.
    pub color: Option<String>,
    pub coordinates: serde_json::Value,
    pub label: Option<String>,
}
