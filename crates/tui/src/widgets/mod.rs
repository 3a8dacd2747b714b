//! Overlay widgets.

pub mod input_bar;
pub mod status_line;

pub use input_bar::InputBar;
pub use status_line::StatusLine;
