use crate::config::Settings;
use crate::state::PanPolicy;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_clamp_cb = {
        let cb = props.on_change.clone();
        let s = props.settings.clone();
        Callback::from(move |_| {
            let pan_policy = match s.pan_policy {
                PanPolicy::Unbounded => PanPolicy::ClampNonNegative,
                PanPolicy::ClampNonNegative => PanPolicy::Unbounded,
            };
            cb.emit(Settings {
                pan_policy,
                ..s.clone()
            })
        })
    };
    let margin_cb = |delta: i32| {
        let cb = props.on_change.clone();
        let s = props.settings.clone();
        Callback::from(move |_| {
            cb.emit(Settings {
                prefetch_margin: (s.prefetch_margin + delta).max(0),
                ..s.clone()
            })
        })
    };
    let threshold_cb = |delta: f64| {
        let cb = props.on_change.clone();
        let s = props.settings.clone();
        Callback::from(move |_| {
            cb.emit(Settings {
                drag_threshold: (s.drag_threshold + delta).max(0.0),
                ..s.clone()
            })
        })
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.settings.pan_policy == PanPolicy::ClampNonNegative} onclick={toggle_clamp_cb} />
                    <span>{"Keep view at non-negative coordinates"}</span>
                </label>
                <div style="display:flex; align-items:center; gap:8px;">
                    <span style="flex:1;">{"Prefetch margin (tiles)"}</span>
                    <button onclick={margin_cb(-1)}>{"-"}</button>
                    <span style="min-width:28px; text-align:center;">{ props.settings.prefetch_margin }</span>
                    <button onclick={margin_cb(1)}>{"+"}</button>
                </div>
                <div style="display:flex; align-items:center; gap:8px;">
                    <span style="flex:1;">{"Drag threshold (px)"}</span>
                    <button onclick={threshold_cb(-1.0)}>{"-"}</button>
                    <span style="min-width:28px; text-align:center;">{ format!("{}", props.settings.drag_threshold) }</span>
                    <button onclick={threshold_cb(1.0)}>{"+"}</button>
                </div>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{ format!("Server: {}", props.settings.server_url) }</div>
            <div style="display:flex; gap:8px; justify-content:flex-end;">
                <button onclick={close_cb}>{"Done"}</button>
            </div>
        </div>
    </div>}
}
