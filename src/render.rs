// Grid layer and brush overlay drawing. Each layer is cleared by its own redraw only.
use crate::coords::tile_to_top_left_pixel;
use crate::model::{Cell, TilePos};
use crate::state::{BrushState, TileWindow, Viewport};

const OUTLINE_COLOR: &str = "black";

/// A 2-D drawing target in viewport-local pixels.
pub trait Surface {
    fn clear(&self);
    fn fill_rect(&self, x: i32, y: i32, size: i32, color: &str);
    fn stroke_rect(&self, x: i32, y: i32, size: i32, color: &str);
}

pub fn paint_tile(surface: &dyn Surface, vp: &Viewport, tile: TilePos, cell: Cell) {
    let p = tile_to_top_left_pixel(tile, vp);
    surface.fill_rect(p.x, p.y, vp.zoom, cell.color());
}

/// Repaints every visible tile the window knows about; unknown tiles stay blank.
pub fn redraw_main(surface: &dyn Surface, vp: &Viewport, window: &TileWindow) {
    surface.clear();
    for tile in vp.visible_tile_bounds().tiles() {
        if let Some(cell) = window.lookup(tile) {
            paint_tile(surface, vp, tile, cell);
        }
    }
}

pub fn redraw_overlay(surface: &dyn Surface, vp: &Viewport, brush: &BrushState) {
    surface.clear();
    if let Some(tile) = brush.hover {
        paint_tile(surface, vp, tile, brush.cell);
        let p = tile_to_top_left_pixel(tile, vp);
        surface.stroke_rect(p.x, p.y, vp.zoom, OUTLINE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TileRect;
    use crate::testing::{DrawOp, RecordingSurface};

    fn vp() -> Viewport {
        Viewport {
            origin_x: 0,
            origin_y: 0,
            width: 60,
            height: 40,
            zoom: 20,
        }
    }

    fn window(x: i32, y: i32, rows: &[&[Cell]]) -> TileWindow {
        let mut w = TileWindow::new();
        w.replace_from_grid(x, y, rows.iter().map(|r| r.iter().copied().map(Some).collect()).collect())
            .unwrap();
        w
    }

    #[test]
    fn main_layer_clears_then_paints_known_visible_tiles() {
        let s = RecordingSurface::default();
        let w = window(0, 0, &[&[Cell::Wire, Cell::Empty], &[Cell::Empty, Cell::Alive]]);
        redraw_main(&s, &vp(), &w);
        let ops = s.ops();
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(ops.len(), 5);
        assert!(ops.contains(&DrawOp::Fill { x: 0, y: 0, size: 20, color: "orange".into() }));
        assert!(ops.contains(&DrawOp::Fill { x: 20, y: 20, size: 20, color: "blue".into() }));
    }

    #[test]
    fn tiles_outside_the_viewport_are_not_painted() {
        let s = RecordingSurface::default();
        let w = window(10, 10, &[&[Cell::Wire]]);
        redraw_main(&s, &vp(), &w);
        assert_eq!(s.ops(), vec![DrawOp::Clear]);
    }

    #[test]
    fn paints_only_inside_visible_bounds_for_large_window() {
        let s = RecordingSurface::default();
        let rows: Vec<Vec<Option<Cell>>> = (0..20).map(|_| vec![Some(Cell::Dead); 20]).collect();
        let mut w = TileWindow::new();
        w.replace_from_grid(-10, -10, rows).unwrap();
        let v = vp();
        redraw_main(&s, &v, &w);
        let fills = s.fills();
        let visible: TileRect = v.visible_tile_bounds();
        assert_eq!(fills.len() as i32, visible.w * visible.h);
    }

    #[test]
    fn overlay_without_hover_only_clears() {
        let s = RecordingSurface::default();
        redraw_overlay(&s, &vp(), &BrushState::default());
        assert_eq!(s.ops(), vec![DrawOp::Clear]);
    }

    #[test]
    fn overlay_paints_brush_at_hover_tile() {
        let s = RecordingSurface::default();
        let brush = BrushState {
            cell: Cell::Dead,
            hover: Some(TilePos::new(2, 1)),
        };
        redraw_overlay(&s, &vp(), &brush);
        assert_eq!(
            s.ops(),
            vec![
                DrawOp::Clear,
                DrawOp::Fill { x: 40, y: 20, size: 20, color: "grey".into() },
                DrawOp::Stroke { x: 40, y: 20, size: 20, color: "black".into() },
            ]
        );
    }
}
