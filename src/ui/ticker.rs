//! The ticker bar and the recent-renders list.
//!
//! Scrolling text is animated as a simple character marquee: the text enters
//! from the right edge and moves one column every [`MARQUEE_STEP_MS`].

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, View};
use crate::render::{Region, RenderMode};

/// Milliseconds per marquee column.
pub const MARQUEE_STEP_MS: u128 = 120;

/// Window of `width` columns over `text` scrolled by `offset` columns.
///
/// The text starts fully off the right edge and wraps once it has left on the
/// left edge.
pub fn marquee_window(text: &str, width: usize, offset: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let padded: Vec<char> = std::iter::repeat(' ')
        .take(width)
        .chain(text.chars())
        .collect();
    let start = offset % padded.len();
    padded
        .iter()
        .cycle()
        .skip(start)
        .take(width)
        .collect()
}

/// Render the content area for the current host view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_view {
        View::Conditions => render_conditions(frame, app, area),
        View::Progress => render_placeholder(frame, app, area, "Loading forecast data..."),
        View::Radar => render_placeholder(frame, app, area, "Radar (ticker hidden)"),
    }
}

fn render_conditions(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    let state = app.viewport();
    let block = Block::default()
        .title(" Current Conditions ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner_width = chunks[0].width.saturating_sub(2) as usize;

    let line = match state.mode() {
        RenderMode::Fixed => Line::from(Span::styled(
            format!(" {}", state.fixed_text),
            app.theme.ticker,
        )),
        RenderMode::Scrolling => {
            let offset = state
                .scroll_started
                .map(|t| (t.elapsed().as_millis() / MARQUEE_STEP_MS) as usize)
                .unwrap_or(0);
            Line::from(Span::styled(
                marquee_window(&state.scroll_text, inner_width, offset),
                app.theme.hazard,
            ))
        }
    };
    frame.render_widget(Paragraph::new(line).block(block), chunks[0]);

    let items: Vec<ListItem> = state
        .recent
        .iter()
        .rev()
        .map(|write| {
            let tag = match write.region {
                Region::Fixed => Span::styled("fixed  ", Style::default().fg(app.theme.healthy)),
                Region::Scroll | Region::ScrollText => {
                    Span::styled("scroll ", Style::default().fg(app.theme.warning))
                }
            };
            ListItem::new(Line::from(vec![tag, Span::raw(write.text.clone())]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Recent renders ({}) ", state.writes))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );
    frame.render_widget(list, chunks[1]);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect, message: &str) {
    let block = Block::default()
        .title(format!(" {} ", app.current_view.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().add_modifier(Modifier::DIM),
    )))
    .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marquee_starts_blank() {
        assert_eq!(marquee_window("ABC", 4, 0), "    ");
    }

    #[test]
    fn test_marquee_enters_from_right() {
        assert_eq!(marquee_window("ABC", 4, 1), "   A");
        assert_eq!(marquee_window("ABC", 4, 3), " ABC");
    }

    #[test]
    fn test_marquee_wraps() {
        // padded length is 7, so offset 7 is back at the start
        assert_eq!(marquee_window("ABC", 4, 7), marquee_window("ABC", 4, 0));
        assert_eq!(marquee_window("ABC", 4, 5), "BC  ");
    }

    #[test]
    fn test_marquee_zero_width() {
        assert_eq!(marquee_window("ABC", 0, 3), "");
    }
}
