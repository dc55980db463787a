// The client session: owns all view state and handles every input on the event thread.
use std::rc::Rc;

use crate::config::Settings;
use crate::error::EngineError;
use crate::model::{Cell, PixelPos, TilePos, TileRect};
use crate::protocol::{self, FromClient, FromServer, Transport, WireCell};
use crate::render::{self, Surface};
use crate::state::{BrushState, DragState, Release, TileWindow, ViewNegotiator, Viewport};
use crate::util::{cdebug, cwarn};

pub type Notice = Rc<dyn Fn(String)>;
pub type BrushObserver = Rc<dyn Fn(Cell)>;
pub type StatusObserver = Rc<dyn Fn(SessionStatus)>;

/// Snapshot for the status line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStatus {
    pub connected: bool,
    pub zoom: i32,
    pub hover: Option<TilePos>,
    pub cached: Option<TileRect>,
    pub requested: Option<TileRect>,
}

pub struct Session {
    settings: Settings,
    viewport: Viewport,
    brush: BrushState,
    drag: DragState,
    window: TileWindow,
    negotiator: ViewNegotiator,
    /// Fractional zoom driven by the wheel; the viewport uses its rounded value.
    zoom_accum: f64,
    connected: bool,
    main: Box<dyn Surface>,
    overlay: Box<dyn Surface>,
    transport: Box<dyn Transport>,
    on_brush_change: Option<BrushObserver>,
    on_notice: Option<Notice>,
    on_status: Option<StatusObserver>,
    last_status: Option<SessionStatus>,
}

impl Session {
    pub fn new(
        settings: Settings,
        viewport: Viewport,
        main: Box<dyn Surface>,
        overlay: Box<dyn Surface>,
        transport: Box<dyn Transport>,
    ) -> Self {
        let settings = settings.sanitized();
        Self {
            negotiator: ViewNegotiator::new(settings.prefetch_margin),
            zoom_accum: viewport.zoom as f64,
            settings,
            viewport,
            brush: BrushState::default(),
            drag: DragState::default(),
            window: TileWindow::new(),
            connected: false,
            main,
            overlay,
            transport,
            on_brush_change: None,
            on_notice: None,
            on_status: None,
            last_status: None,
        }
    }

    pub fn set_brush_observer(&mut self, cb: BrushObserver) {
        cb(self.brush.cell);
        self.on_brush_change = Some(cb);
    }

    pub fn set_notice_sink(&mut self, cb: Notice) {
        self.on_notice = Some(cb);
    }

    pub fn set_status_observer(&mut self, cb: StatusObserver) {
        self.on_status = Some(cb);
        self.last_status = None;
        self.publish_status();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[cfg(test)]
    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    #[cfg(test)]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    #[cfg(test)]
    pub fn tile_window(&self) -> &TileWindow {
        &self.window
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            connected: self.connected,
            zoom: self.viewport.zoom,
            hover: self.brush.hover,
            cached: (!self.window.is_empty()).then(|| self.window.rect()),
            requested: self.negotiator.last_sent(),
        }
    }

    // ---- connection ----

    /// Connection established: start the stream and declare the current view.
    pub fn on_open(&mut self) {
        self.connected = true;
        self.send(&FromClient::StartStream);
        self.negotiator.reset();
        self.negotiate();
        self.publish_status();
    }

    pub fn on_close(&mut self) {
        self.connected = false;
        self.publish_status();
    }

    /// Inbound text frame from the server.
    pub fn handle_message(&mut self, text: &str) {
        match FromServer::decode(text) {
            Ok(FromServer::Refresh { x, y, tiles }) => self.apply_refresh(x, y, tiles),
            Err(e) => self.report(e),
        }
    }

    pub fn apply_refresh(&mut self, x: i32, y: i32, tiles: Vec<Vec<WireCell>>) {
        let decoded = protocol::decode_rows(x, y, tiles);
        match self.window.replace_from_grid(x, y, decoded.rows) {
            Ok(rect) => {
                if self.negotiator.last_sent() != Some(rect) {
                    cdebug(&format!("refresh for {rect} differs from requested view"));
                }
                render::redraw_main(self.main.as_ref(), &self.viewport, &self.window);
                if let Some(first) = decoded.invalid.first() {
                    let count = decoded.invalid.len();
                    let msg = if count == 1 {
                        first.to_string()
                    } else {
                        format!("{first} (and {} more)", count - 1)
                    };
                    cwarn(&msg);
                    self.notify(msg);
                }
                self.publish_status();
            }
            Err(e) => self.report(e),
        }
    }

    // ---- pointer ----

    pub fn pointer_down(&mut self, at: PixelPos) {
        self.drag.press(at);
    }

    pub fn pointer_move(&mut self, at: PixelPos) {
        if let Some((dx, dy)) = self.drag.motion(at, self.settings.drag_threshold) {
            // content follows the pointer
            self.viewport.pan(-dx, -dy, self.settings.pan_policy);
            self.viewport_changed();
        }
        self.brush.hover = Some(self.viewport.tile_at(at));
        render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
        self.publish_status();
    }

    pub fn pointer_up(&mut self, at: PixelPos) {
        if let Release::Click(p) = self.drag.release(at) {
            let tile = self.viewport.tile_at(p);
            self.paint(tile);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.drag.cancel();
        self.brush.hover = None;
        render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
        self.publish_status();
    }

    /// Paints `tile` with the brush locally and asks the server to do the same.
    pub fn paint(&mut self, tile: TilePos) {
        let cell = self.brush.cell;
        render::paint_tile(self.main.as_ref(), &self.viewport, tile, cell);
        self.send(&FromClient::modify_cell(tile, cell));
    }

    // ---- camera ----

    /// Wheel input; positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f64) {
        let (lo, hi) = (self.settings.min_zoom as f64, self.settings.max_zoom as f64);
        self.zoom_accum = (self.zoom_accum - delta_y * self.settings.wheel_sensitivity).clamp(lo, hi);
        let target = self.zoom_accum.round() as i32;
        if target != self.viewport.zoom {
            self.apply_zoom(target);
        }
    }

    pub fn zoom_to(&mut self, zoom: i32) {
        let zoom = zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);
        self.zoom_accum = zoom as f64;
        if zoom != self.viewport.zoom {
            self.apply_zoom(zoom);
        }
    }

    pub fn zoom_by(&mut self, steps: i32) {
        self.zoom_to(self.viewport.zoom + steps);
    }

    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy, self.settings.pan_policy);
        self.viewport_changed();
        render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
    }

    /// Moves the view back so world tile (0, 0) is at the top-left corner.
    pub fn home(&mut self) {
        let (x, y) = (self.viewport.origin_x, self.viewport.origin_y);
        self.pan_by(-x, -y);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        if (width, height) == (self.viewport.width, self.viewport.height) {
            return;
        }
        self.viewport.resize(width, height);
        self.viewport_changed();
        render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
    }

    /// Repaints both layers from current state without renegotiating.
    pub fn redraw(&self) {
        render::redraw_main(self.main.as_ref(), &self.viewport, &self.window);
        render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
    }

    /// Applies edited settings; a changed margin or pan policy takes effect immediately.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        self.negotiator.set_margin(self.settings.prefetch_margin);
        let zoom = self.viewport.zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);
        self.zoom_accum = zoom as f64;
        if zoom != self.viewport.zoom {
            self.apply_zoom(zoom);
        } else {
            self.pan_by(0, 0);
        }
    }

    // ---- brush ----

    pub fn set_brush(&mut self, cell: Cell) {
        self.brush.cell = cell;
        if let Some(cb) = &self.on_brush_change {
            cb(cell);
        }
        if self.brush.hover.is_some() {
            render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
        }
    }

    // ---- internals ----

    fn apply_zoom(&mut self, zoom: i32) {
        self.viewport.zoom_to(zoom, self.settings.pan_policy);
        self.viewport_changed();
        render::redraw_overlay(self.overlay.as_ref(), &self.viewport, &self.brush);
    }

    /// Redraw from cache, then tell the server if the wanted rectangle moved.
    fn viewport_changed(&mut self) {
        render::redraw_main(self.main.as_ref(), &self.viewport, &self.window);
        self.negotiate();
        self.publish_status();
    }

    fn negotiate(&mut self) {
        let bounds = self.negotiator.compute_requested_bounds(&self.viewport);
        if let Some(rect) = self.negotiator.maybe_request(bounds) {
            cdebug(&format!("set view {rect}"));
            self.send(&FromClient::set_view(rect));
        }
    }

    fn send(&self, msg: &FromClient) {
        if let Err(e) = protocol::send(self.transport.as_ref(), msg) {
            // view updates are resent on reconnect; only lost edits matter to the user
            let user_visible =
                matches!(msg, FromClient::ModifyCell { .. }) || matches!(e, EngineError::Encode(_));
            if user_visible {
                self.report(e);
            } else {
                cwarn(&format!("dropped {msg:?}: {e}"));
            }
        }
    }

    fn report(&self, e: EngineError) {
        let msg = e.to_string();
        cwarn(&msg);
        self.notify(msg);
    }

    fn notify(&self, msg: String) {
        if let Some(cb) = &self.on_notice {
            cb(msg);
        }
    }

    fn publish_status(&mut self) {
        let Some(cb) = self.on_status.clone() else {
            return;
        };
        let status = self.status();
        if self.last_status.as_ref() != Some(&status) {
            self.last_status = Some(status.clone());
            cb(status);
        }
    }
}
