// Summary widget: player count and delta spread for the whole table.
//
// Players | Failed | Avg delta | Max delta | Min delta

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use xfpl_football::analysis::Summary;

use super::performance::{delta_style, format_delta};
use super::titled_block;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let line = match &state.report {
        Some(report) => summary_line(&report.summary, report.failures.len()),
        None => Line::from(Span::styled(" --", Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(Paragraph::new(line).block(titled_block("Summary")), area);
}

fn delta_span(label: &'static str, value: Option<f64>) -> Vec<Span<'static>> {
    let value_span = match value {
        Some(v) => Span::styled(format_delta(v), delta_style(v)),
        None => Span::styled("--", Style::default().fg(Color::DarkGray)),
    };
    vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        value_span,
    ]
}

pub fn summary_line(summary: &Summary, failed: usize) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" Players: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", summary.total_players),
            Style::default().fg(Color::White),
        ),
        Span::styled("  Failed: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", failed),
            if failed > 0 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            },
        ),
    ];
    spans.extend(delta_span("  Avg delta: ", summary.avg_delta));
    spans.extend(delta_span("  Max delta: ", summary.max_delta));
    spans.extend(delta_span("  Min delta: ", summary.min_delta));
    Line::from(spans)
}
