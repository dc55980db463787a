pub mod brush;
pub mod drag;
pub mod negotiator;
pub mod tile_window;
pub mod viewport;

pub use brush::BrushState;
pub use drag::{DragState, Release};
pub use negotiator::ViewNegotiator;
pub use tile_window::TileWindow;
pub use viewport::{PanPolicy, Viewport};
