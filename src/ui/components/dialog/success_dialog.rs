//! Registration confirmation dialog

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use crate::state::SuccessSummary;
use ratatui::{style::Color, Frame};

fn success_message(summary: &SuccessSummary) -> String {
    format!(
        "Your account has been created.\n\nName: {}\nEmail: {}\nUsername: {}\nCreated: {}\nReference: {}",
        summary.name, summary.email, summary.username, summary.created_at, summary.reference
    )
}

/// Render the confirmation shown after a successful submission
pub fn render_success_dialog(frame: &mut Frame, summary: &SuccessSummary) {
    let message = success_message(summary);
    render_dialog(
        frame,
        DialogConfig {
            title: "Registration Successful",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(dismiss_hint("Enter", "start over")),
            max_width: 64,
        },
    );
}
