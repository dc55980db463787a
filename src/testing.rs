// Recording fakes for the Surface and Transport seams.
use std::cell::{Cell as StdCell, RefCell};
use std::rc::Rc;

use crate::error::EngineError;
use crate::protocol::{FromClient, Transport};
use crate::render::Surface;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear,
    Fill { x: i32, y: i32, size: i32, color: String },
    Stroke { x: i32, y: i32, size: i32, color: String },
}

#[derive(Default, Clone)]
pub struct RecordingSurface {
    ops: Rc<RefCell<Vec<DrawOp>>>,
}

impl RecordingSurface {
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.borrow().clone()
    }

    pub fn fills(&self) -> Vec<DrawOp> {
        self.ops()
            .into_iter()
            .filter(|op| matches!(op, DrawOp::Fill { .. }))
            .collect()
    }

    pub fn reset(&self) {
        self.ops.borrow_mut().clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&self) {
        self.ops.borrow_mut().push(DrawOp::Clear);
    }

    fn fill_rect(&self, x: i32, y: i32, size: i32, color: &str) {
        self.ops.borrow_mut().push(DrawOp::Fill {
            x,
            y,
            size,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&self, x: i32, y: i32, size: i32, color: &str) {
        self.ops.borrow_mut().push(DrawOp::Stroke {
            x,
            y,
            size,
            color: color.to_string(),
        });
    }
}

#[derive(Clone)]
pub struct RecordingTransport {
    open: Rc<StdCell<bool>>,
    frames: Rc<RefCell<Vec<String>>>,
}

impl RecordingTransport {
    pub fn open() -> Self {
        Self {
            open: Rc::new(StdCell::new(true)),
            frames: Rc::default(),
        }
    }

    pub fn closed() -> Self {
        let t = Self::open();
        t.open.set(false);
        t
    }

    pub fn set_open(&self, open: bool) {
        self.open.set(open);
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.borrow().clone()
    }

    pub fn sent(&self) -> Vec<FromClient> {
        self.frames
            .borrow()
            .iter()
            .map(|f| serde_json::from_str(f).expect("frame is a client message"))
            .collect()
    }

    pub fn clear(&self) {
        self.frames.borrow_mut().clear();
    }
}

impl Transport for RecordingTransport {
    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn send_text(&self, text: &str) -> Result<(), EngineError> {
        self.frames.borrow_mut().push(text.to_string());
        Ok(())
    }
}
