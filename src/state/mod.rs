//! Application state module

pub mod forms;
mod progress_animation;
mod screen_state;

pub use forms::*;
pub use screen_state::*;
