// Local copy of the last tile rectangle the server pushed.
use crate::error::EngineError;
use crate::model::{Cell, TilePos, TileRect};

/// Row-major snapshot of one rectangular slice of the world.
///
/// Slots hold `None` when the server sent something that is not a known cell;
/// those read back as unknown, the same as tiles outside the window.
#[derive(Debug, Clone, Default)]
pub struct TileWindow {
    rect: TileRect,
    tiles: Vec<Option<Cell>>,
}

impl TileWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self) -> TileRect {
        self.rect
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Swaps in a new window. On error the previous contents are left untouched.
    pub fn replace(&mut self, rect: TileRect, rows: Vec<Vec<Option<Cell>>>) -> Result<(), EngineError> {
        if rect.w < 0 || rect.h < 0 {
            return Err(EngineError::MalformedRefresh(format!("negative size {rect}")));
        }
        if !rect.fits_i32() {
            return Err(EngineError::MalformedRefresh(format!("{rect} runs past the coordinate range")));
        }
        if rows.len() != rect.h as usize {
            return Err(EngineError::MalformedRefresh(format!(
                "expected {} rows, got {}",
                rect.h,
                rows.len()
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != rect.w as usize) {
            return Err(EngineError::MalformedRefresh(format!(
                "row {i} has {} tiles, expected {}",
                row.len(),
                rect.w
            )));
        }
        self.tiles = rows.into_iter().flatten().collect();
        self.rect = rect;
        Ok(())
    }

    /// Builds the rectangle from the grid's own shape and replaces the window with it.
    /// Empty and jagged grids are rejected.
    pub fn replace_from_grid(&mut self, x: i32, y: i32, rows: Vec<Vec<Option<Cell>>>) -> Result<TileRect, EngineError> {
        let Some(first) = rows.first() else {
            return Err(EngineError::MalformedRefresh("no rows".into()));
        };
        if first.is_empty() {
            return Err(EngineError::MalformedRefresh("empty first row".into()));
        }
        let rect = TileRect::new(x, y, first.len() as i32, rows.len() as i32);
        self.replace(rect, rows)?;
        Ok(rect)
    }

    pub fn lookup(&self, pos: TilePos) -> Option<Cell> {
        let (col, row) = self.rect.offset_of(pos)?;
        self.tiles.get(row * self.rect.w as usize + col).copied().flatten()
    }
}
