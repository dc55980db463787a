// Conversions between screen pixels, viewport-local pixels and world tiles.
// Every pixel to tile mapping goes through `viewport_local_to_tile`.
use crate::model::{PixelPos, TilePos};
use crate::state::Viewport;

/// Removes the canvas element's on-page offset from a screen position.
pub fn screen_to_viewport_local(screen: PixelPos, canvas_offset: PixelPos) -> PixelPos {
    PixelPos {
        x: screen.x - canvas_offset.x,
        y: screen.y - canvas_offset.y,
    }
}

pub fn viewport_local_to_tile(pixel: PixelPos, vp: &Viewport) -> TilePos {
    TilePos {
        x: (pixel.x + vp.origin_x).div_euclid(vp.zoom),
        y: (pixel.y + vp.origin_y).div_euclid(vp.zoom),
    }
}

/// Top-left corner of `tile`, in viewport-local pixels.
pub fn tile_to_top_left_pixel(tile: TilePos, vp: &Viewport) -> PixelPos {
    PixelPos {
        x: tile.x * vp.zoom - vp.origin_x,
        y: tile.y * vp.zoom - vp.origin_y,
    }
}
