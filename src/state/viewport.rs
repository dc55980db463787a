// Viewport state: pixel origin, canvas size and integer zoom.
use serde::{Deserialize, Serialize};

use crate::coords;
use crate::model::{PixelPos, TilePos, TileRect};

/// How panning treats the world origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanPolicy {
    /// The world is unbounded; any origin is valid.
    #[default]
    Unbounded,
    /// Origin never goes below zero on either axis.
    ClampNonNegative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// World pixel shown at the top-left corner of the canvas.
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: i32,
    pub height: i32,
    /// Pixels per tile, always >= 1.
    pub zoom: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: 600,
            height: 800,
            zoom: 20,
        }
    }
}

/// Rounds half up, so shifting the input by a whole number shifts the output by the same amount.
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

impl Viewport {
    pub fn new(width: i32, height: i32, zoom: i32) -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: width.max(1),
            height: height.max(1),
            zoom: zoom.max(1),
        }
    }

    pub fn pan(&mut self, dx: i32, dy: i32, policy: PanPolicy) {
        self.origin_x += dx;
        self.origin_y += dy;
        self.apply_policy(policy);
    }

    /// Changes the zoom while keeping the world point under the canvas center fixed.
    /// Values below 1 are treated as 1.
    pub fn zoom_to(&mut self, new_zoom: i32, policy: PanPolicy) {
        let new_zoom = new_zoom.max(1);
        let ratio = new_zoom as f64 / self.zoom as f64;
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        self.origin_x = round_half_up((self.origin_x as f64 + half_w) * ratio - half_w);
        self.origin_y = round_half_up((self.origin_y as f64 + half_h) * ratio - half_h);
        self.zoom = new_zoom;
        self.apply_policy(policy);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Tiles touched by the canvas, including the partially visible trailing row and column.
    pub fn visible_tile_bounds(&self) -> TileRect {
        let start_x = self.origin_x.div_euclid(self.zoom);
        let end_x = (self.origin_x + self.width).div_euclid(self.zoom);
        let start_y = self.origin_y.div_euclid(self.zoom);
        let end_y = (self.origin_y + self.height).div_euclid(self.zoom);
        TileRect {
            x: start_x,
            y: start_y,
            w: end_x - start_x + 1,
            h: end_y - start_y + 1,
        }
    }

    #[cfg(test)]
    pub fn center_pixel(&self) -> PixelPos {
        PixelPos::new(self.width / 2, self.height / 2)
    }

    pub fn tile_at(&self, pixel: PixelPos) -> TilePos {
        coords::viewport_local_to_tile(pixel, self)
    }

    fn apply_policy(&mut self, policy: PanPolicy) {
        if policy == PanPolicy::ClampNonNegative {
            self.origin_x = self.origin_x.max(0);
            self.origin_y = self.origin_y.max(0);
        }
    }
}
