pub mod app;
pub mod canvas;
pub mod ui_types;
pub mod utils;
