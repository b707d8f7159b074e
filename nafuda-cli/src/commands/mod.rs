pub mod layouts;
pub mod render;
pub mod render_file;
pub mod sheet;
