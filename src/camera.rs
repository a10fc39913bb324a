use glam::IVec2;

// =============================================================================
// CAMERA.RS — Tile-map camera math
//
// The camera is the world-pixel coordinate shown at the viewport's top-left
// corner. Everything here is a pure function of its inputs:
// - `visible_cells`: which tiles cover the viewport, and where to draw them
// - `clamp_camera`: keep the viewport inside the map's pixel extent
// - `center_camera`: initial camera that centres the map
// =============================================================================

/// Size of a loaded map, in tiles, plus the current tile size in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapGeometry {
    pub width_tiles: i32,
    pub height_tiles: i32,
    /// Edge length of one square tile in pixels.
    pub tile_size: i32,
}

impl MapGeometry {
    pub const fn new(width_tiles: i32, height_tiles: i32, tile_size: i32) -> Self {
        Self { width_tiles, height_tiles, tile_size }
    }

    /// Total map extent in pixels, saturating at `i32::MAX`.
    #[inline]
    pub const fn pixel_size(&self) -> IVec2 {
        IVec2::new(
            self.width_tiles.saturating_mul(self.tile_size),
            self.height_tiles.saturating_mul(self.tile_size),
        )
    }

    /// True when (col, row) addresses a real map tile.
    #[inline]
    pub const fn contains_cell(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.width_tiles && row < self.height_tiles
    }

    /// Screen-space origin and size of the map border for a given camera.
    pub fn screen_bounds(&self, camera: IVec2) -> (IVec2, IVec2) {
        (-camera, self.pixel_size())
    }
}

// ── Visible cells ────────────────────────────────────────────────────────────

/// One tile-sized cell covering part of the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibleCell {
    /// Map column (may be outside the map).
    pub col: i32,
    /// Map row (may be outside the map).
    pub row: i32,
    /// Screen-space top-left pixel of the cell.
    pub pixel: IVec2,
    /// Whether (col, row) lies inside the map. Background fill ignores this;
    /// per-tile overlays should skip cells where it is false.
    pub in_map: bool,
}

/// Enumerate every tile cell overlapping a `viewport`-sized view at `camera`.
///
/// The first cell's screen position lies in `(-tile_size, 0]` on both axes,
/// also for negative cameras (floor division, not truncation). Cells are
/// returned row by row, left to right, each `tile_size` pixels apart.
/// A non-positive tile size or an empty viewport yields no cells.
pub fn visible_cells(camera: IVec2, viewport: IVec2, map: &MapGeometry) -> Vec<VisibleCell> {
    let ts = map.tile_size;
    if ts <= 0 || viewport.x <= 0 || viewport.y <= 0 {
        return Vec::new();
    }

    let first = IVec2::new(-camera.x.rem_euclid(ts), -camera.y.rem_euclid(ts));
    let start_col = camera.x.div_euclid(ts);
    let start_row = camera.y.div_euclid(ts);

    let cols = (viewport.x - first.x + ts - 1) / ts;
    let rows = (viewport.y - first.y + ts - 1) / ts;
    let mut cells = Vec::with_capacity((cols * rows) as usize);

    let mut y = first.y;
    let mut row = start_row;
    while y < viewport.y {
        let mut x = first.x;
        let mut col = start_col;
        while x < viewport.x {
            cells.push(VisibleCell {
                col,
                row,
                pixel: IVec2::new(x, y),
                in_map: map.contains_cell(col, row),
            });
            x += ts;
            col += 1;
        }
        y += ts;
        row += 1;
    }

    cells
}

// ── Clamping ─────────────────────────────────────────────────────────────────

/// Clamp `camera` so the viewport never shows anything past the map edge.
///
/// Per axis the result lies in `0..=max(0, map_pixels - viewport)`; a map
/// smaller than the viewport pins that axis to 0. Idempotent.
pub fn clamp_camera(camera: IVec2, viewport: IVec2, map: &MapGeometry) -> IVec2 {
    let max = map.pixel_size().saturating_sub(viewport).max(IVec2::ZERO);
    camera.clamp(IVec2::ZERO, max)
}

/// Camera that puts the map's centre in the middle of the viewport, or 0 on
/// an axis where the map does not fill the viewport.
pub fn center_camera(viewport: IVec2, map: &MapGeometry) -> IVec2 {
    (map.pixel_size().saturating_sub(viewport) / 2).max(IVec2::ZERO)
}
