// WebSocket plumbing for the session. Frames are JSON text.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use crate::error::EngineError;
use crate::protocol::Transport;

/// Shared handle to the current socket; cheap to clone into the session.
#[derive(Clone, Default)]
pub struct WsTransport {
    ws: Rc<RefCell<Option<WebSocket>>>,
}

impl Transport for WsTransport {
    fn is_open(&self) -> bool {
        self.ws
            .borrow()
            .as_ref()
            .is_some_and(|ws| ws.ready_state() == WebSocket::OPEN)
    }

    fn send_text(&self, text: &str) -> Result<(), EngineError> {
        let guard = self.ws.borrow();
        let Some(ws) = guard.as_ref() else {
            return Err(EngineError::TransportUnavailable);
        };
        ws.send_with_str(text)
            .map_err(|_| EngineError::TransportUnavailable)
    }
}

#[allow(dead_code)]
struct WsHandlers {
    onopen: Closure<dyn FnMut(Event)>,
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    onerror: Closure<dyn FnMut(ErrorEvent)>,
    onclose: Closure<dyn FnMut(Event)>,
}

/// Owns the socket callbacks; dropping it via [`SocketConnection::disconnect`] closes the socket.
pub struct SocketConnection {
    transport: WsTransport,
    handlers: Rc<RefCell<Option<WsHandlers>>>,
    closing: Rc<Cell<bool>>,
}

impl SocketConnection {
    pub fn new(transport: WsTransport) -> Self {
        Self {
            transport,
            handlers: Rc::new(RefCell::new(None)),
            closing: Rc::new(Cell::new(false)),
        }
    }

    pub fn connect(
        &mut self,
        url: &str,
        on_open: Rc<dyn Fn()>,
        on_text: Rc<dyn Fn(String)>,
        on_close: Rc<dyn Fn()>,
    ) {
        self.disconnect();
        let closing = Rc::new(Cell::new(false));
        self.closing = closing.clone();

        let url = url.trim();
        let ws = match WebSocket::new(url) {
            Ok(ws) => ws,
            Err(_) => {
                gloo::console::warn!("failed to open websocket", url);
                on_close();
                return;
            }
        };
        *self.transport.ws.borrow_mut() = Some(ws.clone());

        let onopen = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: Event| {
                gloo::console::log!("websocket connected", url.clone());
                on_open();
            }) as Box<dyn FnMut(Event)>)
        };
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            match event.data().as_string() {
                Some(text) => on_text(text),
                None => gloo::console::warn!("ignoring non-text websocket frame"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        let onerror = {
            let url = url.to_string();
            Closure::wrap(Box::new(move |_event: ErrorEvent| {
                gloo::console::warn!("websocket error", url.clone());
            }) as Box<dyn FnMut(ErrorEvent)>)
        };
        let onclose = {
            let ws_ref = self.transport.ws.clone();
            let url = url.to_string();
            Closure::wrap(Box::new(move |event: Event| {
                ws_ref.borrow_mut().take();
                if closing.get() {
                    return;
                }
                match event.dyn_ref::<CloseEvent>() {
                    Some(close) => gloo::console::log!("websocket closed", url.clone(), close.code()),
                    None => gloo::console::log!("websocket closed", url.clone()),
                }
                on_close();
            }) as Box<dyn FnMut(Event)>)
        };

        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        *self.handlers.borrow_mut() = Some(WsHandlers {
            onopen,
            onmessage,
            onerror,
            onclose,
        });
    }

    pub fn disconnect(&mut self) {
        self.closing.set(true);
        if let Some(ws) = self.transport.ws.borrow_mut().take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
        }
        self.handlers.borrow_mut().take();
    }
}
