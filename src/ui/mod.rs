//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod preview;

use crate::app::App;
use components::{render_notice_dialog, render_success_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = layout::create_layout(area);

    layout::draw_sidebar(frame, layout.sidebar, app);
    layout::draw_header(frame, layout.header, app);
    forms::draw_step(frame, layout.content, app);

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Overlays, topmost last
    let screen = app.screen();
    preview::draw_preview(frame, screen);
    if let Some(notice) = &screen.notice {
        render_notice_dialog(frame, notice);
    }
    if let Some(summary) = &screen.success {
        render_success_dialog(frame, summary);
    }
}
