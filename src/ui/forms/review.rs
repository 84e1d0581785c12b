//! Review summary on the last step

use crate::state::ScreenState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the label column
const LABEL_WIDTH: usize = 15;

pub fn draw_review(frame: &mut Frame, area: Rect, screen: &ScreenState) {
    let block = Block::default()
        .title(" Review your information ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines: Vec<Line> = match &screen.review {
        Some(review) => review
            .rows()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{label:<LABEL_WIDTH$}"),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value.to_string()),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "Nothing to review yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
