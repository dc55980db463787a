use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};
use yew::prelude::*;

use super::{
    brush_panel::BrushPanel, camera_controls::CameraControls, notice::Notice,
    settings_modal::SettingsModal, status_bar::StatusBar,
};
use crate::config::Settings;
use crate::coords::screen_to_viewport_local;
use crate::model::{Cell, PixelPos};
use crate::session::{Session, SessionStatus};
use crate::state::Viewport;
use crate::util::{clog, cwarn};
use crate::web::{CanvasSurface, SocketConnection, WsTransport};

const NOTICE_MS: u32 = 4_000;

type SessionRef = Rc<RefCell<Option<Session>>>;

fn with_session(session: &SessionRef, f: impl FnOnce(&mut Session)) {
    if let Some(s) = session.borrow_mut().as_mut() {
        f(s);
    }
}

/// Matches both canvases to the container; returns the new size.
fn sync_canvas_size(container: &Element, canvases: &[&HtmlCanvasElement]) -> (i32, i32) {
    let w = container.client_width().max(1);
    let h = container.client_height().max(1);
    for canvas in canvases {
        if canvas.width() != w as u32 {
            canvas.set_width(w as u32);
        }
        if canvas.height() != h as u32 {
            canvas.set_height(h as u32);
        }
    }
    (w, h)
}

fn local_pos(canvas: &HtmlCanvasElement, e: &MouseEvent) -> PixelPos {
    let rect = canvas.get_bounding_client_rect();
    screen_to_viewport_local(
        PixelPos::new(e.client_x(), e.client_y()),
        PixelPos::new(rect.left().round() as i32, rect.top().round() as i32),
    )
}

/// Everything kept alive while the view is mounted.
struct Mounted {
    _listeners: Vec<EventListener>,
    connection: SocketConnection,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.connection.disconnect();
    }
}

struct Observers {
    brush: UseStateHandle<Cell>,
    status: UseStateHandle<SessionStatus>,
    notice: UseStateHandle<Option<String>>,
    notice_timer: Rc<RefCell<Option<Timeout>>>,
}

fn mount(
    session: SessionRef,
    settings: Settings,
    container: Element,
    main_canvas: HtmlCanvasElement,
    overlay_canvas: HtmlCanvasElement,
    observers: Observers,
) -> Result<Mounted, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let (w, h) = sync_canvas_size(&container, &[&main_canvas, &overlay_canvas]);
    let transport = WsTransport::default();
    let mut s = Session::new(
        settings.clone(),
        Viewport::new(w, h, settings.initial_zoom),
        Box::new(CanvasSurface::new(main_canvas.clone())?),
        Box::new(CanvasSurface::new(overlay_canvas.clone())?),
        Box::new(transport.clone()),
    );
    {
        let brush = observers.brush.clone();
        s.set_brush_observer(Rc::new(move |c| brush.set(c)));
    }
    {
        let status = observers.status.clone();
        s.set_status_observer(Rc::new(move |st| status.set(st)));
    }
    {
        let notice = observers.notice.clone();
        let timer = observers.notice_timer.clone();
        s.set_notice_sink(Rc::new(move |msg| {
            notice.set(Some(msg));
            let notice = notice.clone();
            *timer.borrow_mut() = Some(Timeout::new(NOTICE_MS, move || notice.set(None)));
        }));
    }
    s.redraw();
    *session.borrow_mut() = Some(s);

    let mut listeners = Vec::new();
    // Pointer input lands on the overlay, which sits on top of the grid.
    {
        let session = session.clone();
        let canvas = overlay_canvas.clone();
        listeners.push(EventListener::new(&overlay_canvas, "mousedown", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            if e.button() == 0 {
                let at = local_pos(&canvas, e);
                with_session(&session, |s| s.pointer_down(at));
            }
        }));
    }
    {
        let session = session.clone();
        let canvas = overlay_canvas.clone();
        listeners.push(EventListener::new(&overlay_canvas, "mousemove", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            let at = local_pos(&canvas, e);
            with_session(&session, |s| s.pointer_move(at));
        }));
    }
    {
        let session = session.clone();
        let canvas = overlay_canvas.clone();
        listeners.push(EventListener::new(&overlay_canvas, "mouseup", move |e| {
            let Some(e) = e.dyn_ref::<MouseEvent>() else { return };
            if e.button() == 0 {
                let at = local_pos(&canvas, e);
                with_session(&session, |s| s.pointer_up(at));
            }
        }));
    }
    {
        let session = session.clone();
        listeners.push(EventListener::new(&overlay_canvas, "mouseleave", move |_| {
            with_session(&session, |s| s.pointer_leave());
        }));
    }
    {
        let session = session.clone();
        listeners.push(EventListener::new_with_options(
            &overlay_canvas,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |e| {
                let Some(e) = e.dyn_ref::<WheelEvent>() else { return };
                e.prevent_default();
                let delta = e.delta_y();
                with_session(&session, |s| s.wheel(delta));
            },
        ));
    }
    {
        let session = session.clone();
        listeners.push(EventListener::new(&window, "keydown", move |e| {
            let Some(e) = e.dyn_ref::<KeyboardEvent>() else { return };
            if e.ctrl_key() || e.meta_key() || e.alt_key() {
                return;
            }
            let key = e.key();
            with_session(&session, |s| {
                let step = s.settings().pan_step;
                match key.as_str() {
                    "ArrowLeft" => s.pan_by(-step, 0),
                    "ArrowRight" => s.pan_by(step, 0),
                    "ArrowUp" => s.pan_by(0, -step),
                    "ArrowDown" => s.pan_by(0, step),
                    "+" | "=" => s.zoom_by(1),
                    "-" => s.zoom_by(-1),
                    other => {
                        if let Some(cell) = Cell::from_hotkey(other) {
                            s.set_brush(cell);
                        }
                    }
                }
            });
        }));
    }
    {
        let session = session.clone();
        let canvases = (main_canvas.clone(), overlay_canvas.clone());
        listeners.push(EventListener::new(&window, "resize", move |_| {
            let (w, h) = sync_canvas_size(&container, &[&canvases.0, &canvases.1]);
            with_session(&session, |s| s.resize(w, h));
        }));
    }

    let mut connection = SocketConnection::new(transport);
    {
        let on_open = {
            let session = session.clone();
            Rc::new(move || with_session(&session, |s| s.on_open())) as Rc<dyn Fn()>
        };
        let on_text = {
            let session = session.clone();
            Rc::new(move |text: String| with_session(&session, |s| s.handle_message(&text)))
                as Rc<dyn Fn(String)>
        };
        let on_close = {
            let session = session.clone();
            Rc::new(move || with_session(&session, |s| s.on_close())) as Rc<dyn Fn()>
        };
        clog(&format!("connecting to {}", settings.server_url));
        connection.connect(&settings.server_url, on_open, on_text, on_close);
    }

    Ok(Mounted {
        _listeners: listeners,
        connection,
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct GridViewProps {
    pub settings: Settings,
    pub on_settings_change: Callback<Settings>,
}

#[function_component(GridView)]
pub fn grid_view(props: &GridViewProps) -> Html {
    let container_ref = use_node_ref();
    let main_ref = use_node_ref();
    let overlay_ref = use_node_ref();
    let session: SessionRef = use_mut_ref(|| None);
    let brush = use_state(|| Cell::Wire);
    let status = use_state(SessionStatus::default);
    let notice = use_state(|| None::<String>);
    let notice_timer = use_mut_ref(|| None::<Timeout>);
    let open_settings = use_state(|| false);

    // Effect: push edited settings into the live session
    {
        let session = session.clone();
        use_effect_with(props.settings.clone(), move |settings| {
            with_session(&session, |s| s.update_settings(settings.clone()));
            || ()
        });
    }
    // Main mount effect (session, listeners, socket)
    {
        let session = session.clone();
        let settings = props.settings.clone();
        let container_ref = container_ref.clone();
        let main_ref = main_ref.clone();
        let overlay_ref = overlay_ref.clone();
        let observers = Observers {
            brush: brush.clone(),
            status: status.clone(),
            notice: notice.clone(),
            notice_timer: notice_timer.clone(),
        };
        use_effect_with((), move |_| {
            let mounted = match (
                container_ref.cast::<Element>(),
                main_ref.cast::<HtmlCanvasElement>(),
                overlay_ref.cast::<HtmlCanvasElement>(),
            ) {
                (Some(container), Some(main), Some(overlay)) => {
                    mount(session.clone(), settings, container, main, overlay, observers)
                        .map_err(|e| cwarn(&format!("grid view mount failed: {e:?}")))
                        .ok()
                }
                _ => {
                    cwarn("grid view canvases not attached");
                    None
                }
            };
            move || {
                drop(mounted);
                session.borrow_mut().take();
            }
        });
    }

    let on_select = {
        let session = session.clone();
        Callback::from(move |cell: Cell| with_session(&session, |s| s.set_brush(cell)))
    };
    let zoom_cb = |dir: i32| {
        let session = session.clone();
        Callback::from(move |_: ()| {
            with_session(&session, |s| {
                let step = (s.viewport().zoom / 5).max(1);
                s.zoom_by(dir * step);
            })
        })
    };
    let pan_cb = |dx: i32, dy: i32| {
        let session = session.clone();
        let step = props.settings.pan_step;
        Callback::from(move |_: ()| with_session(&session, |s| s.pan_by(dx * step, dy * step)))
    };
    let on_home = {
        let session = session.clone();
        Callback::from(move |_: ()| with_session(&session, |s| s.home()))
    };
    let on_open_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(true))
    };
    let on_close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(false))
    };

    html! {
        <div ref={container_ref} style="position:relative; width:100%; height:100%; overflow:hidden; background:#0e1116;">
            <canvas ref={main_ref} style="position:absolute; left:0; top:0; background:#161b22;"></canvas>
            <canvas ref={overlay_ref} style="position:absolute; left:0; top:0; cursor:crosshair;"></canvas>
            <BrushPanel selected={*brush} {on_select} />
            <StatusBar status={(*status).clone()} />
            <CameraControls
                on_zoom_in={zoom_cb(1)}
                on_zoom_out={zoom_cb(-1)}
                on_pan_left={pan_cb(-1, 0)}
                on_pan_right={pan_cb(1, 0)}
                on_pan_up={pan_cb(0, -1)}
                on_pan_down={pan_cb(0, 1)}
                {on_home}
                {on_open_settings}
            />
            <Notice message={(*notice).clone()} />
            <SettingsModal
                show={*open_settings}
                settings={props.settings.clone()}
                on_change={props.on_settings_change.clone()}
                on_close={on_close_settings}
            />
        </div>
    }
}
