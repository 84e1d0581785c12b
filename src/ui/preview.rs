//! JSON preview overlay

use crate::state::ScreenState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Centered rectangle taking `percent` of each dimension
fn centered(area: Rect, percent: u16) -> Rect {
    let width = area.width * percent / 100;
    let height = area.height * percent / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn draw_preview(frame: &mut Frame, screen: &ScreenState) {
    let Some(json) = &screen.preview else {
        return;
    };
    let area = centered(frame.area(), 80);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Form data (JSON) ")
        .title_bottom(" j/k:scroll  Esc:close ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    frame.render_widget(
        Paragraph::new(json.as_str())
            .scroll((screen.preview_scroll, 0))
            .block(block),
        area,
    );
}
