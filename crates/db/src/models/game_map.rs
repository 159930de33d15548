//! Game map model and DTOs.

use mapboard_core::dimensions::ImageDimensions;
use mapboard_core::error::CoreError;
use mapboard_core::game_map::GameMode;
use mapboard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `game_maps` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GameMap {
    pub id: DbId,
    pub name: String,
    /// Relative path of the image in the asset store. Empty when the map
    /// has no image.
    pub image_path: String,
    pub width: i32,
    pub height: i32,
    pub mode: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

impl GameMap {
    /// Stored pixel dimensions.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Parsed game mode. The `ck_game_maps_mode` constraint keeps this valid
    /// for every persisted row.
    pub fn game_mode(&self) -> Result<GameMode, CoreError> {
        GameMode::from_str(&self.mode)
    }

    /// Whether the map references a stored image at all.
    pub fn has_image(&self) -> bool {
        !self.image_path.is_empty()
    }
}

/// DTO for inserting a new map. Dimensions are filled in by the caller from
/// the uploaded image before insert.
#[derive(Debug, Clone)]
pub struct CreateGameMap {
    pub name: String,
    pub image_path: String,
    pub dimensions: ImageDimensions,
    pub mode: GameMode,
    pub created_by: DbId,
}

/// DTO for editing a map. Only non-`None` fields are applied.
///
/// `image_path` and `dimensions` are set together when the image is
/// replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateGameMap {
    pub name: Option<String>,
    pub mode: Option<GameMode>,
    pub image_path: Option<String>,
    pub dimensions: Option<ImageDimensions>,
}
