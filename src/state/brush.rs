use crate::model::{Cell, TilePos};

/// Active paint value plus the tile the pointer currently hovers, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushState {
    pub cell: Cell,
    pub hover: Option<TilePos>,
}

impl Default for BrushState {
    fn default() -> Self {
        Self {
            cell: Cell::Wire,
            hover: None,
        }
    }
}
