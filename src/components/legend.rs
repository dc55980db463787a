use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SwatchProps {
    pub color: &'static str,
}

#[function_component(Swatch)]
pub fn swatch(props: &SwatchProps) -> Html {
    html! { <span style={format!("display:inline-block; width:12px; height:12px; background:{}; border:1px solid #30363d; border-radius:2px;", props.color)}></span> }
}
