//! Whole-form notice dialog

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Render a notice overlay centered on the screen
pub fn render_notice_dialog(frame: &mut Frame, message: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Notice",
            title_color: Color::Red,
            border_color: Color::Red,
            message,
            hint: Some(dismiss_hint("any key", "dismiss")),
            max_width: 60,
        },
    );
}
