//! Sprite sheet auto-slicer.
//!
//! Splits a transparency-keyed sheet into one bounding box per connected
//! group of opaque pixels.
//!
//! Connectivity is 4-directional: pixels that only touch diagonally end up in
//! separate regions. Regions come out in the row-major order of their first
//! (top-most, then left-most) pixel. Bounding boxes of distinct regions may
//! overlap, the pixel sets never do.

use std::collections::BTreeMap;

use image::{GenericImageView, Rgba};

use crate::geometry::{NEIGHBORS_4, Rect};

/// Tuning for the opacity test.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SliceOptions {
    /// A pixel counts as opaque when its alpha is strictly greater than this.
    /// `0` treats every non-transparent pixel as sprite content.
    pub alpha_threshold: u8,
}

impl SliceOptions {
    pub fn with_alpha_threshold(mut self, alpha_threshold: u8) -> Self {
        self.alpha_threshold = alpha_threshold;
        self
    }
}

/// Extract one minimal bounding box per connected opaque region of `image`.
///
/// An empty or fully transparent image yields an empty list.
pub fn extract_regions<I>(image: &I) -> Vec<Rect>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    extract_regions_with_options(image, SliceOptions::default())
}

/// [`extract_regions`] with an explicit alpha threshold.
pub fn extract_regions_with_options<I>(image: &I, options: SliceOptions) -> Vec<Rect>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    extract_regions_with(width, height, |x, y| {
        image.get_pixel(x, y).0[3] > options.alpha_threshold
    })
}

/// Run the slicer over any `width × height` opacity predicate.
///
/// `is_opaque` is only ever called with in-bounds coordinates.
pub fn extract_regions_with(
    width: u32,
    height: u32,
    is_opaque: impl Fn(u32, u32) -> bool,
) -> Vec<Rect> {
    let regions = scan(width, height, is_opaque, |_, _, _| {});
    log::debug!("sliced {width}x{height} mask into {} regions", regions.len());
    regions
}

// ── Labelling ────────────────────────────────────────────────────────────────

/// Per-pixel component assignment produced alongside the bounding boxes.
#[derive(Clone, Debug)]
pub struct RegionLabels {
    width: u32,
    height: u32,
    labels: Vec<Option<u32>>,
    regions: Vec<Rect>,
    pixel_counts: Vec<u64>,
}

impl RegionLabels {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounding boxes, indexed by label.
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    /// Label of the region owning (x, y), or `None` for transparent or
    /// out-of-bounds pixels.
    pub fn label_at(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.labels[y as usize * self.width as usize + x as usize].map(|l| l as usize)
    }

    /// Number of opaque pixels in region `label` (0 for unknown labels).
    pub fn pixel_count(&self, label: usize) -> u64 {
        self.pixel_counts.get(label).copied().unwrap_or(0)
    }

    pub fn into_regions(self) -> Vec<Rect> {
        self.regions
    }
}

/// Like [`extract_regions_with_options`] but also records which region owns
/// every opaque pixel.
pub fn label_regions<I>(image: &I, options: SliceOptions) -> RegionLabels
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    let mut labels = vec![None; width as usize * height as usize];
    let mut pixel_counts: Vec<u64> = Vec::new();

    let regions = scan(
        width,
        height,
        |x, y| image.get_pixel(x, y).0[3] > options.alpha_threshold,
        |label, x, y| {
            labels[y as usize * width as usize + x as usize] = Some(label as u32);
            if pixel_counts.len() <= label {
                pixel_counts.resize(label + 1, 0);
            }
            pixel_counts[label] += 1;
        },
    );

    RegionLabels { width, height, labels, regions, pixel_counts }
}

/// Default naming step: `"{prefix}_{index}"` in emission order.
pub fn name_regions(regions: &[Rect], prefix: &str) -> BTreeMap<String, Rect> {
    regions
        .iter()
        .enumerate()
        .map(|(i, rect)| (format!("{prefix}_{i}"), *rect))
        .collect()
}

// ── Flood fill ───────────────────────────────────────────────────────────────

/// Row-major scan seeding an explicit-stack flood fill at every unvisited
/// opaque pixel. `on_pixel(label, x, y)` fires once per opaque pixel.
fn scan(
    width: u32,
    height: u32,
    is_opaque: impl Fn(u32, u32) -> bool,
    mut on_pixel: impl FnMut(usize, u32, u32),
) -> Vec<Rect> {
    let mut regions = Vec::new();
    if width == 0 || height == 0 {
        return regions;
    }

    let w = width as usize;
    let mut visited = vec![false; w * height as usize];
    // Reused across components; never shared between calls.
    let mut stack: Vec<(i64, i64)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited[y as usize * w + x as usize] || !is_opaque(x, y) {
                continue;
            }

            let label = regions.len();
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            stack.push((i64::from(x), i64::from(y)));

            while let Some((px, py)) = stack.pop() {
                if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                    continue;
                }
                let (px, py) = (px as u32, py as u32);
                let idx = py as usize * w + px as usize;
                if visited[idx] || !is_opaque(px, py) {
                    continue;
                }

                visited[idx] = true;
                on_pixel(label, px, py);
                min_x = min_x.min(px);
                min_y = min_y.min(py);
                max_x = max_x.max(px);
                max_y = max_y.max(py);

                // Duplicates are allowed; the visited check above drops them.
                for (dx, dy) in NEIGHBORS_4 {
                    stack.push((i64::from(px) + dx, i64::from(py) + dy));
                }
            }

            regions.push(Rect::from_ltrb(min_x, min_y, max_x + 1, max_y + 1));
        }
    }

    regions
}
