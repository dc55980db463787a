use crate::session::SessionStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub status: SessionStatus,
}

#[function_component]
pub fn StatusBar(props: &StatusBarProps) -> Html {
    let s = &props.status;
    let row_style = "display:flex; gap:8px;";
    let label_style = "flex:1; opacity:0.7;";
    let value_style = "text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let (conn_label, conn_color) = if s.connected {
        ("connected", "#2ea043")
    } else {
        ("disconnected", "#f85149")
    };
    let hover = s
        .hover
        .map(|t| format!("{}, {}", t.x, t.y))
        .unwrap_or_else(|| "-".into());
    let cached = s.cached.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
    let requested = s.requested.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
    html! {
        <div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:220px; display:flex; flex-direction:column; gap:6px; font-size:12px;">
            <div style={row_style}>
                <span style={label_style}>{"Server"}</span>
                <span style={format!("{} color:{};", value_style, conn_color)}>{ conn_label }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Zoom"}</span>
                <span style={value_style}>{ format!("{} px/tile", s.zoom) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Tile"}</span>
                <span style={value_style}>{ hover }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Cached"}</span>
                <span style={value_style}>{ cached }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Requested"}</span>
                <span style={value_style}>{ requested }</span>
            </div>
        </div>
    }
}
