//! Dialog components for TUI

mod base;
mod notice_dialog;
mod success_dialog;

pub use notice_dialog::render_notice_dialog;
pub use success_dialog::render_success_dialog;
