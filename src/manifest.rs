use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::slicer::name_regions;

// ── RegionEntry ──────────────────────────────────────────────────────────────

/// One named rectangle as stored on disk: top-left corner plus size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<Rect> for RegionEntry {
    fn from(rect: Rect) -> Self {
        Self { x: rect.min_x, y: rect.min_y, width: rect.width(), height: rect.height() }
    }
}

impl RegionEntry {
    /// Convert to a pixel rectangle. Entries without pixels are rejected;
    /// entries past the image edge are left for the sheet to report.
    pub fn to_rect(&self, name: &str) -> Result<Rect> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyRegion { name: name.to_string() });
        }
        Ok(Rect::from_ltrb(
            self.x,
            self.y,
            self.x.saturating_add(self.width),
            self.y.saturating_add(self.height),
        ))
    }
}

// ── SheetManifest ────────────────────────────────────────────────────────────

/// Name → rectangle table for a single sprite sheet.
///
/// ```json
/// {
///   "image": "units.png",
///   "regions": {
///     "archer": { "x": 0, "y": 0, "width": 16, "height": 24 }
///   }
/// }
/// ```
///
/// Regions are kept sorted so saved files diff cleanly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetManifest {
    /// Sheet image path, relative to the assets directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub regions: BTreeMap<String, RegionEntry>,
}

impl SheetManifest {
    /// Name slicer output with [`name_regions`] and wrap it as a manifest.
    pub fn from_rects(image: Option<String>, rects: &[Rect], prefix: &str) -> Self {
        let regions = name_regions(rects, prefix)
            .into_iter()
            .map(|(name, rect)| (name, RegionEntry::from(rect)))
            .collect();
        Self { image, regions }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })
    }

    /// Every entry as a pixel rectangle. Fails on the first empty entry.
    pub fn to_regions(&self) -> Result<HashMap<String, Rect>> {
        self.regions
            .iter()
            .map(|(name, entry)| Ok((name.clone(), entry.to_rect(name)?)))
            .collect()
    }
}
