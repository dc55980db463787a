pub mod app;
pub mod brush_panel;
pub mod camera_controls;
pub mod grid_view;
pub mod legend;
pub mod notice;
pub mod settings_modal;
pub mod status_bar;
