//! Pixel dimension detection for uploaded map images.
//!
//! Only the image header is decoded. The payload is read through a borrowed
//! cursor, so the caller's bytes are left untouched and can be persisted
//! as-is after detection.

use std::io::Cursor;

use image::ImageReader;
use serde::Serialize;

use crate::game_map::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};

/// Width and height of an image in pixels. Both are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: i32,
    pub height: i32,
}

impl ImageDimensions {
    /// Dimensions stored when detection fails.
    pub const FALLBACK: ImageDimensions = ImageDimensions {
        width: DEFAULT_MAP_WIDTH,
        height: DEFAULT_MAP_HEIGHT,
    };
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Why an image's dimensions could not be read.
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    #[error("image payload is empty")]
    Empty,

    #[error("failed to read image header: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image dimensions {width}x{height} are out of range")]
    OutOfRange { width: u32, height: u32 },
}

/// Read the pixel dimensions of an encoded image.
///
/// The format is guessed from the content, not from a file name.
pub fn read_dimensions(data: &[u8]) -> Result<ImageDimensions, DimensionError> {
    if data.is_empty() {
        return Err(DimensionError::Empty);
    }

    let (width, height) = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;

    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(ImageDimensions {
            width: w,
            height: h,
        }),
        _ => Err(DimensionError::OutOfRange { width, height }),
    }
}

/// Detect an uploaded image's dimensions, falling back to
/// [`ImageDimensions::FALLBACK`] on any failure.
///
/// Map creation must never fail because of a bad image, so errors are logged
/// and swallowed here.
pub fn detect_dimensions(data: &[u8]) -> ImageDimensions {
    match read_dimensions(data) {
        Ok(dims) => dims,
        Err(e) => {
            tracing::warn!(
                error = %e,
                bytes = data.len(),
                fallback = %ImageDimensions::FALLBACK,
                "Could not determine image dimensions, using fallback",
            );
            ImageDimensions::FALLBACK
        }
    }
}
