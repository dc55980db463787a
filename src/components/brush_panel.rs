use super::legend::Swatch;
use crate::model::Cell;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BrushPanelProps {
    pub selected: Cell,
    pub on_select: Callback<Cell>,
}

#[function_component]
pub fn BrushPanel(props: &BrushPanelProps) -> Html {
    let button = |cell: Cell| {
        let cb = props.on_select.clone();
        let onclick = Callback::from(move |_| cb.emit(cell));
        let selected = cell == props.selected;
        let border = if selected { "#58a6ff" } else { "#30363d" };
        html! {
            <button {onclick} data-selected={selected.to_string()} style={format!("display:flex; align-items:center; gap:8px; border:1px solid {}; text-align:left;", border)}>
                <Swatch color={cell.color()} />
                <span style="flex:1;">{ cell.label() }</span>
                <span style="font-size:11px; opacity:0.6;">{ cell.hotkey().to_string() }</span>
            </button>
        }
    };
    html! {<div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:150px; display:flex; flex-direction:column; gap:6px;">
        <div style="font-weight:600; margin-bottom:2px;">{"Brush"}</div>
        { for Cell::ALL.into_iter().map(button) }
    </div>}
}
