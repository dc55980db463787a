mod components;
mod config;
mod coords;
mod error;
mod model;
mod protocol;
mod render;
mod session;
mod state;
#[cfg(test)]
mod testing;
mod util;
mod web;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
