use super::grid_view::GridView;
use crate::config::Settings;
use crate::model::Cell;
use crate::web::storage::{load_settings, save_settings};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(load_settings);

    let on_settings_change = {
        let settings = settings.clone();
        Callback::from(move |next: Settings| {
            let next = next.sanitized();
            save_settings(&next);
            settings.set(next);
        })
    };

    let hint = Cell::ALL
        .iter()
        .map(|c| format!("{} {}", c.hotkey(), c.label()))
        .collect::<Vec<_>>()
        .join(" · ");

    html! {
        <div style="display:flex; flex-direction:column; width:100vw; height:100vh; background:#0e1116; color:#c9d1d9; font-family:system-ui, sans-serif;">
            <div id="top-bar" style="display:flex; align-items:center; gap:16px; padding:8px 14px; border-bottom:1px solid #30363d; font-size:13px;">
                <span style="font-weight:700; letter-spacing:0.5px;">{"Wire Universe"}</span>
                <span style="opacity:0.6;">{ hint }</span>
                <span style="margin-left:auto; opacity:0.6;">{"drag to pan · wheel to zoom · click to paint"}</span>
            </div>
            <div style="flex:1; min-height:0;">
                <GridView settings={(*settings).clone()} {on_settings_change} />
            </div>
        </div>
    }
}
