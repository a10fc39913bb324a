pub mod assets;
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod manifest;
pub mod slicer;
pub mod sprite_sheet;
pub mod view;

pub use error::{Error, Result};
pub use geometry::Rect;
pub use slicer::{SliceOptions, extract_regions};
pub use sprite_sheet::SpriteSheet;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "conquest.json";

/// Name prefix for regions that come straight out of the slicer.
pub const DEFAULT_REGION_PREFIX: &str = "sprite";
