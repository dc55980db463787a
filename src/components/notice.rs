use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeProps {
    pub message: Option<String>,
}

/// Passive, non-blocking message line; the owner clears it on a timer.
#[function_component]
pub fn Notice(props: &NoticeProps) -> Html {
    match &props.message {
        Some(txt) if !txt.is_empty() => html! {
            <div style="position:absolute; bottom:12px; right:12px; max-width:360px; font-size:12px; line-height:1.3; background:#1c2128; border:1px solid #f0883e; color:#f0883e; padding:6px 10px; border-radius:6px; pointer-events:none;">
                { txt.clone() }
            </div>
        },
        _ => html! {},
    }
}
