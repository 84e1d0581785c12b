//! Layout components (header, sidebar, status bar)

use super::components::{render_step_indicator, IndicatorState, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{
    COPY_SHORTCUT, EXPORT_SHORTCUT, PREVIEW_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Sidebar width in columns
const SIDEBAR_WIDTH: u16 = 22;

/// Screen regions
pub struct AppLayout {
    pub sidebar: Rect,
    pub header: Rect,
    pub content: Rect,
}

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> AppLayout {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(rows[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Step
        ])
        .split(columns[1]);

    AppLayout {
        sidebar: columns[0],
        header: main[0],
        content: main[1],
    }
}

/// Draw the step indicators as a column of boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let steps = &app.form.definition().steps;

    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(steps.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let current = app.form.current_step();
    for (idx, step) in steps.iter().enumerate() {
        let state = if idx == current {
            IndicatorState::Active
        } else if app.form.is_completed(idx) {
            IndicatorState::Completed
        } else {
            IndicatorState::Upcoming
        };
        let key = format!("F{}", idx + 1);
        render_step_indicator(frame, chunks[idx + 1], &key, &step.title, state);
    }
}

/// Draw the progress gauge
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let progress = app.screen().progress.value();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Registration ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{progress:.0}%"));
    frame.render_widget(gauge, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    let busy = app.screen().submitting;
    let indicator = if busy {
        Span::styled(" ◌ ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(indicator);

    spans.push(Span::styled(
        get_step_hints(app.form.is_last_step()),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current step
fn get_step_hints(last_step: bool) -> String {
    let enter = if last_step { "Enter:submit" } else { "Enter:next" };
    format!(
        "Tab:field  {enter}  Esc:back  {SUBMIT_SHORTCUT}:submit  {PREVIEW_SHORTCUT}:preview  \
         {EXPORT_SHORTCUT}:export  {COPY_SHORTCUT}:copy  {RESET_SHORTCUT}:reset"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_status_line() {
        let layout = create_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.sidebar.height, 39);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.content.y, 3);
        assert_eq!(layout.content.height, 36);
    }

    #[test]
    fn test_hints_switch_on_last_step() {
        assert!(get_step_hints(false).contains("Enter:next"));
        assert!(get_step_hints(true).contains("Enter:submit"));
    }
}
