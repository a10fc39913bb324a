use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::manifest::SheetManifest;
use crate::slicer::{extract_regions, name_regions};

// ── SpriteSheet ──────────────────────────────────────────────────────────────

/// A decoded sheet image plus a fixed name → rectangle lookup table.
///
/// The table is built once and never changes, so a sheet can be shared
/// between threads and queried concurrently. Rectangles are not checked
/// against the image until a sprite is requested (or [`SpriteSheet::validate`]
/// is called).
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    image: Arc<RgbaImage>,
    regions: HashMap<String, Rect>,
}

impl SpriteSheet {
    pub fn new(
        image: impl Into<Arc<RgbaImage>>,
        regions: impl IntoIterator<Item = (String, Rect)>,
    ) -> Self {
        Self { image: image.into(), regions: regions.into_iter().collect() }
    }

    /// Build a sheet from a manifest. Empty manifest entries are rejected
    /// here; out-of-bounds entries are reported when cropped.
    pub fn from_manifest(image: impl Into<Arc<RgbaImage>>, manifest: &SheetManifest) -> Result<Self> {
        Ok(Self { image: image.into(), regions: manifest.to_regions()? })
    }

    /// Slice the image and name every region `"{prefix}_{index}"`.
    pub fn auto_sliced(image: impl Into<Arc<RgbaImage>>, prefix: &str) -> Self {
        let image = image.into();
        let regions = name_regions(&extract_regions(&*image), prefix);
        Self::new(image, regions)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn region(&self, name: &str) -> Option<Rect> {
        self.regions.get(name).copied()
    }

    /// All region names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Copy the pixels of region `name` into a new image.
    ///
    /// The copy owns its storage: editing it never touches the sheet.
    pub fn get_sprite(&self, name: &str) -> Result<RgbaImage> {
        let rect = self
            .regions
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound { name: name.to_string() })?;
        self.check(name, rect)?;

        Ok(image::imageops::crop_imm(
            &*self.image,
            rect.min_x,
            rect.min_y,
            rect.width(),
            rect.height(),
        )
        .to_image())
    }

    /// Every region that cannot be cropped, sorted by name.
    pub fn validate(&self) -> Vec<Error> {
        let mut entries: Vec<(&String, &Rect)> = self.regions.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        entries
            .into_iter()
            .filter_map(|(name, rect)| self.check(name, *rect).err())
            .inspect(|e| log::warn!("sprite_sheet: {e}"))
            .collect()
    }

    fn check(&self, name: &str, rect: Rect) -> Result<()> {
        if rect.is_empty() {
            return Err(Error::EmptyRegion { name: name.to_string() });
        }
        let (width, height) = self.image.dimensions();
        if !rect.fits_within(width, height) {
            return Err(Error::OutOfBounds { name: name.to_string(), rect, width, height });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
