// Wire messages exchanged with the simulation server, one externally tagged JSON object per frame.
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{Cell, TilePos, TileRect};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FromClient {
    StartStream,
    SetView { x: i32, y: i32, w: i32, h: i32 },
    ModifyCell { x: i32, y: i32, cell: Cell },
}

impl FromClient {
    pub fn set_view(rect: TileRect) -> Self {
        FromClient::SetView {
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }

    pub fn modify_cell(pos: TilePos, cell: Cell) -> Self {
        FromClient::ModifyCell {
            x: pos.x,
            y: pos.y,
            cell,
        }
    }

    pub fn encode(&self) -> Result<String, EngineError> {
        serde_json::to_string(self).map_err(EngineError::Encode)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FromServer {
    /// Snapshot of a rectangle; `tiles[row][col]`.
    Refresh { x: i32, y: i32, tiles: Vec<Vec<WireCell>> },
}

impl FromServer {
    pub fn decode(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text).map_err(EngineError::Decode)
    }
}

/// A cell as it appears on the wire. Anything that is not one of the four
/// cell names is kept so it can be reported instead of failing the whole frame.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireCell {
    Known(Cell),
    Other(serde_json::Value),
}

/// Refresh rows converted to cache slots, plus one error per unrecognised cell.
pub struct DecodedRows {
    pub rows: Vec<Vec<Option<Cell>>>,
    pub invalid: Vec<EngineError>,
}

pub fn decode_rows(x: i32, y: i32, tiles: Vec<Vec<WireCell>>) -> DecodedRows {
    let mut invalid = Vec::new();
    let rows = tiles
        .into_iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .into_iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    WireCell::Known(c) => Some(c),
                    WireCell::Other(raw) => {
                        invalid.push(EngineError::InvalidCellValue {
                            pos: TilePos::new(x.saturating_add(col as i32), y.saturating_add(row as i32)),
                            raw: raw.to_string(),
                        });
                        None
                    }
                })
                .collect()
        })
        .collect();
    DecodedRows { rows, invalid }
}

/// Outgoing half of the server connection. Sends are fire-and-forget.
pub trait Transport {
    fn is_open(&self) -> bool;
    fn send_text(&self, text: &str) -> Result<(), EngineError>;
}

/// Encodes and sends one message; fails fast when the connection is not open.
pub fn send(transport: &dyn Transport, msg: &FromClient) -> Result<(), EngineError> {
    if !transport.is_open() {
        return Err(EngineError::TransportUnavailable);
    }
    transport.send_text(&msg.encode()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;

    #[test]
    fn outgoing_messages_use_tagged_json() {
        assert_eq!(FromClient::StartStream.encode().unwrap(), r#""StartStream""#);
        assert_eq!(
            FromClient::set_view(TileRect::new(-5, -5, 26, 26)).encode().unwrap(),
            r#"{"SetView":{"x":-5,"y":-5,"w":26,"h":26}}"#
        );
        assert_eq!(
            FromClient::modify_cell(TilePos::new(2, 3), Cell::Alive).encode().unwrap(),
            r#"{"ModifyCell":{"x":2,"y":3,"cell":"Alive"}}"#
        );
    }

    #[test]
    fn refresh_decodes() {
        let msg = FromServer::decode(r#"{"Refresh":{"x":0,"y":-1,"tiles":[["Wire","Empty"],["Empty","Alive"]]}}"#).unwrap();
        let FromServer::Refresh { x, y, tiles } = msg;
        assert_eq!((x, y), (0, -1));
        assert_eq!(tiles[1][1], WireCell::Known(Cell::Alive));
    }

    #[test]
    fn unknown_tag_is_a_decode_error() {
        let err = FromServer::decode(r#"{"PartialRefresh":{"tiles":[]}}"#).unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
        assert!(FromServer::decode("not json").is_err());
    }

    #[test]
    fn unknown_cells_are_reported_with_position() {
        let msg = FromServer::decode(r#"{"Refresh":{"x":10,"y":20,"tiles":[["Wire","Spark"],[3,"Dead"]]}}"#).unwrap();
        let FromServer::Refresh { x, y, tiles } = msg;
        let decoded = decode_rows(x, y, tiles);
        assert_eq!(decoded.rows, vec![vec![Some(Cell::Wire), None], vec![None, Some(Cell::Dead)]]);
        assert_eq!(decoded.invalid.len(), 2);
        match &decoded.invalid[0] {
            EngineError::InvalidCellValue { pos, raw } => {
                assert_eq!(*pos, TilePos::new(11, 20));
                assert_eq!(raw, r#""Spark""#);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_cell_positions_saturate_at_i32_max() {
        let tiles = vec![vec![WireCell::Known(Cell::Wire), WireCell::Other(serde_json::json!("X"))]];
        let decoded = decode_rows(i32::MAX, 0, tiles);
        assert_eq!(decoded.rows, vec![vec![Some(Cell::Wire), None]]);
        match &decoded.invalid[..] {
            [EngineError::InvalidCellValue { pos, .. }] => assert_eq!(*pos, TilePos::new(i32::MAX, 0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn send_refuses_closed_transport() {
        let t = RecordingTransport::closed();
        let err = send(&t, &FromClient::StartStream).unwrap_err();
        assert!(matches!(err, EngineError::TransportUnavailable));
        assert!(t.sent().is_empty());
    }

    #[test]
    fn send_writes_encoded_text() {
        let t = RecordingTransport::open();
        send(&t, &FromClient::StartStream).unwrap();
        assert_eq!(t.sent(), vec![FromClient::StartStream]);
    }
}
