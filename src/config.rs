use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::AssetResolver;
use crate::camera::MapGeometry;
use crate::error::{Error, Result};

// ── MapConfig ─────────────────────────────────────────────────────────────────

/// The tile map loaded at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width_tiles: i32,
    pub height_tiles: i32,
    /// Background tile image, relative to the assets directory.
    pub tile_sheet: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width_tiles: 1000,
            height_tiles: 1000,
            tile_sheet: "tiles/grass.png".to_string(),
        }
    }
}

// ── ViewConfig ────────────────────────────────────────────────────────────────

/// Scrolling and zoom tuning for the map viewer. All distances in pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Initial tile size.
    pub tile_size: i32,
    pub min_tile_size: i32,
    pub max_tile_size: i32,
    /// Tile size change per zoom step.
    pub zoom_step: i32,
    /// Camera movement per tick while the pointer sits in an edge band.
    pub scroll_speed: i32,
    /// Width of the edge band that triggers edge scrolling.
    pub edge_margin: i32,
    /// Lower bound for the per-tick movement of held direction keys;
    /// the actual step is `max(min_key_step, tile_size / 2)`.
    pub min_key_step: i32,
    /// Interval between viewer ticks.
    pub tick_interval_ms: u64,
    pub viewport_width: i32,
    pub viewport_height: i32,
}

impl ViewConfig {
    /// Check that the zoom settings describe a usable range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason: String| Err(Error::InvalidConfig { field, reason });
        if self.zoom_step <= 0 {
            return invalid("view.zoom_step", format!("must be positive, got {}", self.zoom_step));
        }
        if self.min_tile_size <= 0 {
            return invalid("view.min_tile_size", format!("must be positive, got {}", self.min_tile_size));
        }
        if self.min_tile_size > self.max_tile_size {
            return invalid(
                "view.max_tile_size",
                format!("{} is below min_tile_size {}", self.max_tile_size, self.min_tile_size),
            );
        }
        if !(self.min_tile_size..=self.max_tile_size).contains(&self.tile_size) {
            return invalid(
                "view.tile_size",
                format!(
                    "{} is outside {}..={}",
                    self.tile_size, self.min_tile_size, self.max_tile_size
                ),
            );
        }
        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            tile_size: 160,
            min_tile_size: 128,
            max_tile_size: 256,
            zoom_step: 8,
            scroll_speed: 128,
            edge_margin: 20,
            min_key_step: 24,
            tick_interval_ms: 30,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

// ── GameConfig ────────────────────────────────────────────────────────────────

/// Top-level configuration, read from JSON. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Root that `assets_dir` and `game_data_dir` are relative to.
    /// `None` means the current working directory.
    pub base_dir: Option<PathBuf>,
    pub assets_dir: PathBuf,
    pub game_data_dir: PathBuf,
    pub map: MapConfig,
    pub view: ViewConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            assets_dir: PathBuf::from("assets"),
            game_data_dir: PathBuf::from("gamedata"),
            map: MapConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Parse and validate a config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.view.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`GameConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("config {} not found; using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// The configured base directory, or the working directory.
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir()
                .map_err(|source| Error::Io { path: PathBuf::from("."), source }),
        }
    }

    pub fn resolver(&self) -> Result<AssetResolver> {
        let base = self.base_dir()?;
        Ok(AssetResolver::new(base.join(&self.assets_dir), base.join(&self.game_data_dir)))
    }

    /// Map geometry at the configured initial tile size.
    pub fn map_geometry(&self) -> MapGeometry {
        MapGeometry::new(self.map.width_tiles, self.map.height_tiles, self.view.tile_size)
    }
}
