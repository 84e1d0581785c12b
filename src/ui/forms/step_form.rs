//! Current step rendering

use super::field_renderer::{draw_field, field_height, FieldDecorations};
use super::review::draw_review;
use crate::app::App;
use crate::state::{
    FieldKind, FormField, InputShape, PasswordRequirement, ScreenState, StrengthBand,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Width of the password feedback panel
const PASSWORD_PANEL_WIDTH: u16 = 30;

/// Draw the active step: its fields plus the panel that goes with it
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.form.step();
    let screen = app.screen();

    let block = Block::default()
        .title(format!(
            " Step {} of {}: {} ",
            app.form.current_step() + 1,
            app.form.step_count(),
            step.title
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let has_password = step.fields.iter().any(|f| f.kind == FieldKind::Password);
    let (fields_area, side_area) = if app.form.is_last_step() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(inner);
        draw_review(frame, chunks[0], screen);
        (chunks[1], None)
    } else if has_password {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(PASSWORD_PANEL_WIDTH)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    draw_fields(frame, fields_area, app);

    if let Some(side_area) = side_area {
        draw_password_panel(frame, side_area, screen);
    }
}

/// First field to draw so the active one stays visible
fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    let mut start = 0;
    while start < active {
        let used: u16 = heights[start..=active].iter().sum();
        if used <= available {
            break;
        }
        start += 1;
    }
    start
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.form.step();
    let screen = app.screen();
    let active = step.active_field_index;

    let heights: Vec<u16> = step
        .fields
        .iter()
        .map(|f| field_height(f, screen.error_for(&f.name).is_some()))
        .collect();
    let start = first_visible(&heights, active, area.height);

    let mut y = area.y;
    for (index, field) in step.fields.iter().enumerate().skip(start) {
        let height = heights[index];
        if y + height > area.y + area.height {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        let is_active = index == active;
        draw_field(
            frame,
            field_area,
            field,
            is_active,
            decorations(app, screen, field, is_active),
        );
        y += height;
    }
}

fn decorations<'a>(
    app: &'a App,
    screen: &ScreenState,
    field: &FormField,
    is_active: bool,
) -> FieldDecorations<'a> {
    FieldDecorations {
        error: screen.error_for(&field.name),
        counter: field
            .max_length
            .and_then(|_| app.form.character_count(&field.name)),
        pending_input: (is_active && field.shape == InputShape::File)
            .then_some(app.file_path_input.as_str()),
        file_preview: screen.file_previews.get(&field.name).map(|p| p.describe()),
    }
}

fn band_color(band: StrengthBand) -> Color {
    match band {
        StrengthBand::Weak => Color::Red,
        StrengthBand::Fair => Color::Yellow,
        StrengthBand::Strong => Color::Green,
    }
}

/// Strength meter, requirement checklist and match indicator
fn draw_password_panel(frame: &mut Frame, area: Rect, screen: &ScreenState) {
    let block = Block::default()
        .title(" Password ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let (ratio, label, color) = match screen.strength {
        Some(strength) => (
            f64::from(strength.score) / 100.0,
            strength.band.label(),
            band_color(strength.band),
        ),
        None => (0.0, "", Color::DarkGray),
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, chunks[0]);

    let mut lines = vec![Line::default()];
    for requirement in PasswordRequirement::ALL {
        let (mark, color) = if screen.requirement_met(requirement) {
            ("✓", Color::Green)
        } else {
            ("✗", Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {mark} "), Style::default().fg(color)),
            Span::styled(requirement.label(), Style::default().fg(color)),
        ]));
    }

    lines.push(Line::default());
    match screen.password_match {
        Some(true) => lines.push(Line::from(Span::styled(
            " ✓ Passwords match",
            Style::default().fg(Color::Green),
        ))),
        Some(false) => lines.push(Line::from(Span::styled(
            " ✗ Passwords do not match",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => {}
    }

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_keeps_active_in_view() {
        let heights = [3, 3, 3, 3, 5];
        assert_eq!(first_visible(&heights, 0, 9), 0);
        assert_eq!(first_visible(&heights, 2, 9), 0);
        assert_eq!(first_visible(&heights, 3, 9), 1);
        assert_eq!(first_visible(&heights, 4, 9), 3);
    }

    #[test]
    fn test_first_visible_with_tiny_area() {
        assert_eq!(first_visible(&[3, 3, 3], 2, 1), 2);
    }
}
