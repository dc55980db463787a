use thiserror::Error;

use crate::model::TilePos;

/// Every failure the engine can hit. None of them end the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed refresh: {0}")]
    MalformedRefresh(String),
    #[error("invalid cell value {raw} at ({}, {})", pos.x, pos.y)]
    InvalidCellValue { pos: TilePos, raw: String },
    #[error("connection is not open")]
    TransportUnavailable,
    #[error("could not decode server message: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not encode client message: {0}")]
    Encode(#[source] serde_json::Error),
}
