use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Rect;

/// Errors reported by sprite sheet, manifest, and asset operations.
///
/// None of these are fatal; each one is handed back to the immediate caller.
#[derive(Debug, Error)]
pub enum Error {
    /// No region with this name exists in the sheet.
    #[error("no sprite named '{name}'")]
    NotFound { name: String },

    /// A region reaches past the edge of the source image.
    #[error("sprite '{name}' at {rect} lies outside the {width}x{height} source image")]
    OutOfBounds {
        name: String,
        rect: Rect,
        width: u32,
        height: u32,
    },

    /// A manifest entry with zero width or height.
    #[error("region '{name}' has no pixels")]
    EmptyRegion { name: String },

    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode or encode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A configuration value outside its allowed range.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
