// Status bar widget: fetch indicator, data source and time, tab bar,
// latest message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use xfpl_app::protocol::TabId;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [fetch indicator] [source @ time] [tab bar] [message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, dot_color) = fetch_indicator(state);
    spans.push(Span::styled(format!(" {} ", dot), Style::default().fg(dot_color)));

    let origin = match &state.report {
        Some(report) => format!(
            "{} @ {}",
            report.source,
            report.fetched_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => "no data".to_string(),
    };
    spans.push(Span::styled(origin, Style::default().fg(Color::White)));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    spans.extend(tab_spans(state.active_tab));

    if let Some(err) = &state.fetch_error {
        spans.push(Span::styled(
            format!("fetch failed: {}", err),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(message) = &state.message {
        spans.push(Span::styled(message.clone(), Style::default().fg(Color::Cyan)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Yellow while fetching, red after a failed fetch, green otherwise.
pub fn fetch_indicator(state: &ViewState) -> (&'static str, Color) {
    if state.loading {
        ("●", Color::Yellow)
    } else if state.fetch_error.is_some() {
        ("●", Color::Red)
    } else {
        ("●", Color::Green)
    }
}

/// "[1:Regular] [2:Rotation] [3:Transfers] [4:Failures]" with the active tab
/// highlighted.
pub fn tab_spans(active: TabId) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for tab in TabId::ALL {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("[{}:{}]", tab.index() + 1, tab.title()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    spans
}
