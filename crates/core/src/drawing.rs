//! Map drawing tool types and validation.
//!
//! Drawings are annotation shapes layered on a map. Their `coordinates`
//! payload is opaque JSON whose shape depends on the tool type; it is
//! interpreted by the client-side renderer and never schema-checked here.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Color used when a drawing is created without one.
pub const DEFAULT_DRAWING_COLOR: &str = "#ff0000";

/// Maximum length of a drawing's text label, in characters.
pub const MAX_LABEL_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Drawing tool types
// ---------------------------------------------------------------------------

/// Available drawing tools for map annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingToolType {
    Marker,
    Polyline,
    Polygon,
    Rectangle,
    Circle,
    Text,
}

/// All valid drawing tool type strings.
pub const VALID_TOOL_STRINGS: &[&str] =
    &["marker", "polyline", "polygon", "rectangle", "circle", "text"];

impl DrawingToolType {
    /// Every tool, in display order.
    pub const ALL: [DrawingToolType; 6] = [
        Self::Marker,
        Self::Polyline,
        Self::Polygon,
        Self::Rectangle,
        Self::Circle,
        Self::Text,
    ];

    /// Return the tool type as a lowercase string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Text => "text",
        }
    }

    /// Parse a tool type from a string slice.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "marker" => Ok(Self::Marker),
            "polyline" => Ok(Self::Polyline),
            "polygon" => Ok(Self::Polygon),
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "text" => Ok(Self::Text),
            _ => Err(CoreError::Validation(format!(
                "Invalid drawing tool type '{s}'. Must be one of: {}",
                VALID_TOOL_STRINGS.join(", ")
            ))),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Marker => "Marker",
            Self::Polyline => "Line",
            Self::Polygon => "Area",
            Self::Rectangle => "Rectangle",
            Self::Circle => "Circle",
            Self::Text => "Text",
        }
    }
}

/// One entry of the tool picker exposed to the editor.
#[derive(Debug, Clone, Serialize)]
pub struct ToolChoice {
    pub value: &'static str,
    pub label: &'static str,
}

/// All tool choices in display order.
pub fn tool_choices() -> Vec<ToolChoice> {
    DrawingToolType::ALL
        .into_iter()
        .map(|tool| ToolChoice {
            value: tool.as_str(),
            label: tool.label(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a color string matches the `#RRGGBB` hex format.
pub fn validate_color_hex(color: &str) -> Result<(), CoreError> {
    if color.len() != 7 {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB hex format"
        )));
    }

    let Some(hex_part) = color.strip_prefix('#') else {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must start with '#'"
        )));
    };

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must contain only hex digits after '#'"
        )));
    }

    Ok(())
}

/// Validate an optional text label against [`MAX_LABEL_LEN`].
pub fn validate_label(label: Option<&str>) -> Result<(), CoreError> {
    if let Some(label) = label {
        let len = label.chars().count();
        if len > MAX_LABEL_LEN {
            return Err(CoreError::Validation(format!(
                "Label must be at most {MAX_LABEL_LEN} characters, got {len}"
            )));
        }
    }
    Ok(())
}
