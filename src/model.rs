// Core data types: cell kinds, coordinates and tile rectangles.
use serde::{Deserialize, Serialize};

/// One automaton cell. The serialized names are the wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wire,
    /// Electron head.
    Alive,
    /// Electron tail.
    Dead,
}

impl Cell {
    pub const ALL: [Cell; 4] = [Cell::Wire, Cell::Alive, Cell::Dead, Cell::Empty];

    /// Fill color used on both canvases.
    pub fn color(self) -> &'static str {
        match self {
            Cell::Empty => "white",
            Cell::Wire => "orange",
            Cell::Alive => "blue",
            Cell::Dead => "grey",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cell::Empty => "Blank",
            Cell::Wire => "Wire",
            Cell::Alive => "Electron",
            Cell::Dead => "Tail",
        }
    }

    /// Keyboard binding that selects this cell as the brush.
    pub fn hotkey(self) -> char {
        match self {
            Cell::Wire => 'a',
            Cell::Alive => 's',
            Cell::Dead => 'd',
            Cell::Empty => 'f',
        }
    }

    pub fn from_hotkey(key: &str) -> Option<Cell> {
        Cell::ALL
            .into_iter()
            .find(|c| key.len() == 1 && key.starts_with(c.hotkey()))
    }
}

/// Integer pixel position relative to some origin (screen or viewport).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: PixelPos) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// World tile address, independent of zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in tile space. `x`/`y` is the top-left tile, `w`/`h` are tile counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.offset_of(pos).is_some()
    }

    /// Column and row of `pos` inside the rectangle; `None` outside it.
    pub fn offset_of(&self, pos: TilePos) -> Option<(usize, usize)> {
        let dx = pos.x as i64 - self.x as i64;
        let dy = pos.y as i64 - self.y as i64;
        if dx < 0 || dy < 0 || dx >= self.w as i64 || dy >= self.h as i64 {
            return None;
        }
        Some((dx as usize, dy as usize))
    }

    /// True when every tile of the rectangle has an `i32` address.
    pub fn fits_i32(&self) -> bool {
        self.x.checked_add(self.w).is_some() && self.y.checked_add(self.h).is_some()
    }

    /// Grows the rectangle by `margin` tiles on every side.
    pub fn expand(self, margin: i32) -> Self {
        Self {
            x: self.x.saturating_sub(margin),
            y: self.y.saturating_sub(margin),
            w: self.w.saturating_add(margin.saturating_mul(2)),
            h: self.h.saturating_add(margin.saturating_mul(2)),
        }
    }

    /// Row-major iteration over every tile in the rectangle.
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        (self.y..self.y.saturating_add(self.h.max(0))).flat_map(move |y| {
            (self.x..self.x.saturating_add(self.w.max(0))).map(move |x| TilePos { x, y })
        })
    }
}

impl std::fmt::Display for TileRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ ({}, {})", self.w, self.h, self.x, self.y)
    }
}
