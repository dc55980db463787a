// Browser implementations of the engine seams: canvas, WebSocket and localStorage.
pub mod canvas;
pub mod socket;
pub mod storage;

pub use canvas::CanvasSurface;
pub use socket::{SocketConnection, WsTransport};
