//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// How a step indicator is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Active,
    Completed,
    Upcoming,
}

/// Render a generic button with border
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, state: IndicatorState) {
    let (border_style, text_style) = match state {
        IndicatorState::Active => (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        IndicatorState::Completed => (
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Green),
        ),
        IndicatorState::Upcoming => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a step indicator with its shortcut key and title
pub fn render_step_indicator(
    frame: &mut Frame,
    area: Rect,
    key: &str,
    title: &str,
    state: IndicatorState,
) {
    let mark = if state == IndicatorState::Completed {
        "✓"
    } else {
        key
    };
    let content = format!("{mark} {title}");
    render_button(frame, area, &content, state);
}
