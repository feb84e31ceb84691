//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};

/// Render the header bar with the rotation's position and phase.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let phase = app.phase();

    let mut spans = vec![
        Span::styled(" ● ", app.theme.phase_style(phase)),
        Span::styled("WX TICKER ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(phase.label(), app.theme.phase_style(phase)),
        Span::raw(" │ panel "),
        Span::styled(
            format!("{}/{}", app.screen_index() + 1, app.panel_count()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {}", app.panel_name())),
    ];
    if app.waiting() {
        spans.push(Span::styled(
            " │ waiting for data",
            Style::default().fg(app.theme.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing the host views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Conditions "),
        Line::from(" 2:Progress "),
        Line::from(" 3:Radar "),
    ];

    let selected = match app.current_view {
        View::Conditions => 0,
        View::Progress => 1,
        View::Radar => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the data source and available controls, or a temporary message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let style = if app.load_error.is_some() {
        Style::default().fg(app.theme.warning)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let paragraph = Paragraph::new(status_text(app)).style(style);

    frame.render_widget(paragraph, area);
}

/// Status bar text: the source error if there is one, else source and controls.
pub fn status_text(app: &App) -> String {
    if let Some(ref err) = app.load_error {
        format!(" Error: {} | r:retry q:quit", err)
    } else {
        format!(
            " {} | Tab:switch view r:restart ?:help q:quit",
            app.source_description()
        )
    }
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Host views",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab ←/→     Switch views"),
        Line::from("  1           Conditions (ticker on)"),
        Line::from("  2           Progress (resets ticker)"),
        Line::from("  3           Radar (pauses ticker)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Restart a halted ticker"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
