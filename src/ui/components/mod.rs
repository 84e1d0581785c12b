//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_step_indicator, IndicatorState, BUTTON_HEIGHT};
pub use dialog::{render_notice_dialog, render_success_dialog};
