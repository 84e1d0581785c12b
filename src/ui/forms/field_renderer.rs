//! Field rendering utilities for forms

use crate::state::{CharacterCount, CounterLevel, ErrorKind, FormField, InputShape};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field takes, including its error line
pub fn field_height(field: &FormField, has_error: bool) -> u16 {
    let body = if field.is_multiline() { 5 } else { 3 };
    body + u16::from(has_error)
}

/// Per-field extras drawn around the input
#[derive(Debug, Default)]
pub struct FieldDecorations<'a> {
    pub error: Option<ErrorKind>,
    pub counter: Option<CharacterCount>,
    /// Replaces the stored value (file path being typed)
    pub pending_input: Option<&'a str>,
    /// Line shown under a file field
    pub file_preview: Option<String>,
}

fn counter_span(counter: CharacterCount) -> Span<'static> {
    let color = match counter.level {
        CounterLevel::Normal => Color::DarkGray,
        CounterLevel::Warning => Color::Yellow,
        CounterLevel::Critical => Color::Red,
    };
    Span::styled(
        format!(" {}/{} ", counter.length, counter.max),
        Style::default().fg(color),
    )
}

fn input_hint(field: &FormField) -> &'static str {
    match field.shape {
        InputShape::Choice(_) => " ←/→ ",
        InputShape::MultiChoice(_) => " 1-9 toggle ",
        InputShape::Checkbox => " Space ",
        InputShape::File => " path + Enter ",
        InputShape::Text | InputShape::Multiline => "",
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    decorations: FieldDecorations,
) {
    let (input_area, error_area) = if decorations.error.is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = match (decorations.error, is_active) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Cyan),
        (None, false) => Style::default().fg(Color::DarkGray),
    };

    let display_value = match decorations.pending_input {
        Some(input) if !input.is_empty() => input.to_string(),
        _ => decorations
            .file_preview
            .clone()
            .unwrap_or_else(|| field.display_value()),
    };
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active && (field.accepts_typing() || field.shape == InputShape::File) {
        "▌"
    } else {
        ""
    };

    let content = if field.is_multiline() {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if !cursor.is_empty() {
            if display_str.ends_with('\n') || lines.is_empty() {
                lines.push(Line::default());
            }
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let required = if field.required { " *" } else { "" };
    let mut block = Block::default()
        .title(format!(" {}{required} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(counter) = decorations.counter {
        block = block.title_bottom(Line::from(counter_span(counter)).right_aligned());
    }
    if is_active {
        let hint = input_hint(field);
        if !hint.is_empty() {
            block = block.title_top(
                Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                    .right_aligned(),
            );
        }
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), input_area);

    if let (Some(error), Some(error_area)) = (decorations.error, error_area) {
        let line = Paragraph::new(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(line, error_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldKind;

    #[test]
    fn test_heights() {
        let text = FormField::text("email", "Email", FieldKind::Email);
        let bio = FormField::multiline("bio", "Bio");
        assert_eq!(field_height(&text, false), 3);
        assert_eq!(field_height(&text, true), 4);
        assert_eq!(field_height(&bio, false), 5);
    }

    #[test]
    fn test_hints_follow_shape() {
        assert_eq!(input_hint(&FormField::checkbox("terms", "Terms")), " Space ");
        assert_eq!(input_hint(&FormField::multiline("bio", "Bio")), "");
    }
}
