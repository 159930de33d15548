//! Game map constants, game modes, and validation.
//!
//! A map's mode is a closed set of gameplay categories. The human-readable
//! labels live in a static table next to the enum rather than in the
//! presentation layer.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Width stored when an uploaded image's dimensions cannot be determined.
pub const DEFAULT_MAP_WIDTH: i32 = 1000;

/// Height stored when an uploaded image's dimensions cannot be determined.
pub const DEFAULT_MAP_HEIGHT: i32 = 1000;

/// Maximum length of a map name, in characters.
pub const MAX_MAP_NAME_LEN: usize = 200;

/// Asset store directory that uploaded map images are written to.
pub const MAP_IMAGE_DIR: &str = "maps";

// ---------------------------------------------------------------------------
// Game modes
// ---------------------------------------------------------------------------

/// Gameplay category a map is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Random,
    AttackDefense,
    Encounter,
    Assault,
    GrandBattle,
    Clash,
}

/// Static label table: `(mode, label, icon)`, in display order.
const MODE_TABLE: &[(GameMode, &str, &str)] = &[
    (GameMode::Random, "Random Battle", "🎲"),
    (GameMode::AttackDefense, "Attack/Defense", "⚔️"),
    (GameMode::Encounter, "Encounter", "🏁"),
    (GameMode::Assault, "Assault", "💥"),
    (GameMode::GrandBattle, "Grand Battle", "👑"),
    (GameMode::Clash, "Clash", "⚡"),
];

/// All valid mode strings, in display order.
pub const VALID_MODE_STRINGS: &[&str] = &[
    "random",
    "attack_defense",
    "encounter",
    "assault",
    "grand_battle",
    "clash",
];

impl GameMode {
    /// Every mode, in display order.
    pub const ALL: [GameMode; 6] = [
        Self::Random,
        Self::AttackDefense,
        Self::Encounter,
        Self::Assault,
        Self::GrandBattle,
        Self::Clash,
    ];

    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::AttackDefense => "attack_defense",
            Self::Encounter => "encounter",
            Self::Assault => "assault",
            Self::GrandBattle => "grand_battle",
            Self::Clash => "clash",
        }
    }

    /// Parse a mode from its database string, rejecting unknown values.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid game mode '{s}'. Must be one of: {}",
                    VALID_MODE_STRINGS.join(", ")
                ))
            })
    }

    /// Human-readable label, e.g. `"Attack/Defense"`.
    pub fn label(&self) -> &'static str {
        self.table_entry().1
    }

    /// Short pictogram shown next to the label.
    pub fn icon(&self) -> &'static str {
        self.table_entry().2
    }

    /// Label prefixed with the mode's icon, e.g. `"🎲 Random Battle"`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.icon(), self.label())
    }

    fn table_entry(&self) -> &'static (GameMode, &'static str, &'static str) {
        MODE_TABLE
            .iter()
            .find(|(mode, _, _)| mode == self)
            .unwrap_or(&MODE_TABLE[0])
    }
}

/// One entry of the mode picker offered alongside the map list.
#[derive(Debug, Clone, Serialize)]
pub struct ModeChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// All mode choices in display order.
pub fn mode_choices() -> Vec<ModeChoice> {
    MODE_TABLE
        .iter()
        .map(|(mode, label, icon)| ModeChoice {
            value: mode.as_str(),
            label,
            icon,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a map name: non-blank and at most [`MAX_MAP_NAME_LEN`] characters.
pub fn validate_map_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Map name must not be empty".into()));
    }
    let len = name.chars().count();
    if len > MAX_MAP_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Map name must be at most {MAX_MAP_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn mode_round_trips_through_database_string() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_str(mode.as_str()).unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_matches!(GameMode::from_str("other"), Err(CoreError::Validation(_)));
        assert_matches!(GameMode::from_str("Random"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn default_mode_is_random() {
        assert_eq!(GameMode::default(), GameMode::Random);
    }

    #[test]
    fn labels_come_from_static_table() {
        assert_eq!(GameMode::AttackDefense.label(), "Attack/Defense");
        assert_eq!(GameMode::GrandBattle.icon(), "👑");
        assert_eq!(GameMode::Random.display_name(), "🎲 Random Battle");
    }

    #[test]
    fn mode_choices_cover_every_mode_in_order() {
        let values: Vec<_> = mode_choices().into_iter().map(|c| c.value).collect();
        assert_eq!(values, VALID_MODE_STRINGS);
    }

    #[test]
    fn mode_serializes_as_snake_case() {
        let json = serde_json::to_string(&GameMode::AttackDefense).unwrap();
        assert_eq!(json, "\"attack_defense\"");
    }

    #[test]
    fn map_name_validation() {
        assert!(validate_map_name("Abandoned Base").is_ok());
        assert!(validate_map_name("   ").is_err());
        assert!(validate_map_name(&"x".repeat(MAX_MAP_NAME_LEN)).is_ok());
        assert!(validate_map_name(&"x".repeat(MAX_MAP_NAME_LEN + 1)).is_err());
    }
}
