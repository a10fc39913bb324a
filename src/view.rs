use std::time::{Duration, Instant};

use glam::IVec2;

use crate::camera::{MapGeometry, VisibleCell, center_camera, clamp_camera, visible_cells};
use crate::config::{GameConfig, ViewConfig};

// ── ScrollIntent ─────────────────────────────────────────────────────────────

/// Directions the player is currently holding, already decoded from whatever
/// input device the shell uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl ScrollIntent {
    /// Sum of held directions as a unit-per-axis vector (opposites cancel).
    fn direction(&self) -> IVec2 {
        IVec2::new(
            i32::from(self.right) - i32::from(self.left),
            i32::from(self.down) - i32::from(self.up),
        )
    }
}

// ── ViewState ────────────────────────────────────────────────────────────────

/// Camera, zoom, and viewport of the tile-map viewer.
///
/// Every mutation ends with a clamp, so `camera()` always keeps the viewport
/// inside the map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    camera: IVec2,
    tile_size: i32,
    viewport: IVec2,
    width_tiles: i32,
    height_tiles: i32,
    settings: ViewConfig,
}

impl ViewState {
    /// Viewer for the configured map, centred.
    pub fn new(config: &GameConfig) -> Self {
        let mut view = Self {
            camera: IVec2::ZERO,
            tile_size: config.view.tile_size,
            viewport: IVec2::new(config.view.viewport_width, config.view.viewport_height),
            width_tiles: config.map.width_tiles,
            height_tiles: config.map.height_tiles,
            settings: config.view.clone(),
        };
        view.center();
        view
    }

    pub fn camera(&self) -> IVec2 {
        self.camera
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn viewport(&self) -> IVec2 {
        self.viewport
    }

    /// Map geometry at the current zoom level.
    pub fn map(&self) -> MapGeometry {
        MapGeometry::new(self.width_tiles, self.height_tiles, self.tile_size)
    }

    pub fn set_camera(&mut self, camera: IVec2) {
        self.camera = camera;
        self.clamp();
    }

    /// Per-tick camera movement of a held direction key.
    pub fn key_step(&self) -> i32 {
        self.settings.min_key_step.max(self.tile_size / 2)
    }

    /// Advance one viewer tick: apply held directions, then edge scrolling
    /// for `pointer` (viewport coordinates, `None` when outside the window),
    /// then clamp.
    pub fn tick(&mut self, intent: &ScrollIntent, pointer: Option<IVec2>) {
        self.camera += intent.direction() * self.key_step();
        if let Some(p) = pointer {
            self.camera += self.edge_scroll(p) * self.settings.scroll_speed;
        }
        self.clamp();
    }

    /// Edge-scroll direction for a pointer position: -1/0/+1 per axis.
    /// Pointers outside the viewport do not scroll.
    pub fn edge_scroll(&self, pointer: IVec2) -> IVec2 {
        let inside = pointer.x >= 0
            && pointer.y >= 0
            && pointer.x <= self.viewport.x
            && pointer.y <= self.viewport.y;
        if !inside {
            return IVec2::ZERO;
        }

        let edge = self.settings.edge_margin;
        let mut dir = IVec2::ZERO;
        if pointer.x < edge {
            dir.x -= 1;
        }
        if pointer.x > self.viewport.x - edge {
            dir.x += 1;
        }
        if pointer.y < edge {
            dir.y -= 1;
        }
        if pointer.y > self.viewport.y - edge {
            dir.y += 1;
        }
        dir
    }

    /// Grow tiles by one zoom step. Returns false when the tile size did
    /// not change.
    pub fn zoom_in(&mut self) -> bool {
        let step = self.settings.zoom_step.max(0);
        self.set_tile_size(self.tile_size.saturating_add(step))
    }

    /// Shrink tiles by one zoom step. Returns false when the tile size did
    /// not change.
    pub fn zoom_out(&mut self) -> bool {
        let step = self.settings.zoom_step.max(0);
        self.set_tile_size(self.tile_size.saturating_sub(step))
    }

    /// Set the tile size, bounded to the configured zoom range, and re-clamp.
    /// Returns whether the tile size changed.
    pub fn set_tile_size(&mut self, tile_size: i32) -> bool {
        let min = self.settings.min_tile_size.max(1);
        let max = self.settings.max_tile_size.max(min);
        let tile_size = tile_size.clamp(min, max);
        if tile_size == self.tile_size {
            return false;
        }
        self.tile_size = tile_size;
        self.clamp();
        true
    }

    pub fn resize(&mut self, viewport: IVec2) {
        self.viewport = viewport;
        self.clamp();
    }

    pub fn center(&mut self) {
        self.camera = center_camera(self.viewport, &self.map());
    }

    /// Cells to draw for the current camera and zoom.
    pub fn visible_cells(&self) -> Vec<VisibleCell> {
        visible_cells(self.camera, self.viewport, &self.map())
    }

    fn clamp(&mut self) {
        self.camera = clamp_camera(self.camera, self.viewport, &self.map());
    }
}

// ── FrameCounter ─────────────────────────────────────────────────────────────

/// Frames-per-second readout, refreshed once per second.
#[derive(Clone, Debug)]
pub struct FrameCounter {
    frames: u32,
    fps: u32,
    last_publish: Instant,
}

impl FrameCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new(now: Instant) -> Self {
        Self { frames: 0, fps: 0, last_publish: now }
    }

    /// Count one frame drawn at `now` and return the current readout.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        if now.saturating_duration_since(self.last_publish) >= Self::WINDOW {
            self.fps = self.frames;
            self.frames = 0;
            self.last_publish = now;
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
