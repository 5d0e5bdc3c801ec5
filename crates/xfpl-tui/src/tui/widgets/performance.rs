// Performance tables: scored players with a colour-coded delta column.
//
// Columns: #, Name, Team, Pos, Min, Pts, xFPL, xFPL90, Delta, Perf%
// Positive delta green (bright and bold when large), negative delta red.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;
use xfpl_app::report::PoolRanking;
use xfpl_football::engine::ExpectedScoreRecord;

use super::titled_block;
use crate::tui::layout::AppLayout;

/// Deltas at or beyond this magnitude get the emphasised colour.
const STRONG_DELTA: f64 = 10.0;

pub fn delta_style(delta: f64) -> Style {
    if delta >= STRONG_DELTA {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    } else if delta > 0.0 {
        Style::default().fg(Color::Green)
    } else if delta <= -STRONG_DELTA {
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    } else if delta < 0.0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

pub fn format_delta(delta: f64) -> String {
    format!("{:+.2}", delta)
}

/// First row to show: the requested offset, clamped so at least one row
/// remains visible.
pub fn clamp_scroll(scroll: usize, len: usize) -> usize {
    scroll.min(len.saturating_sub(1))
}

pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    title: String,
    records: &[ExpectedScoreRecord],
    scroll: usize,
) {
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Team"),
        Cell::from("Pos"),
        Cell::from("Min"),
        Cell::from("Pts"),
        Cell::from("xFPL"),
        Cell::from("xFPL90"),
        Cell::from("Delta"),
        Cell::from("Perf%"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let start = clamp_scroll(scroll, records.len());
    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .skip(start)
        .map(|(i, r)| {
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(r.player.name.clone()),
                Cell::from(r.player.team.clone()),
                Cell::from(r.player.position_name()),
                Cell::from(format!("{}", r.player.minutes)),
                Cell::from(format!("{}", r.player.total_points)),
                Cell::from(format!("{:.2}", r.xfpl)),
                Cell::from(format!("{:.2}", r.xfpl90)),
                Cell::from(format_delta(r.delta)).style(delta_style(r.delta)),
                Cell::from(format!("{:.1}", r.performance_pct)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(12),
        Constraint::Length(7),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!("{} ({})", title, records.len())));
    frame.render_widget(table, area);
}

/// Overperformers on the left, underperformers on the right.
pub fn render_pool(
    frame: &mut Frame,
    layout: &AppLayout,
    pool: &PoolRanking,
    label: &str,
    scroll: usize,
) {
    render_table(
        frame,
        layout.left,
        format!("Overperformers {}", label),
        &pool.over,
        scroll,
    );
    render_table(
        frame,
        layout.right,
        format!("Underperformers {}", label),
        &pool.under,
        scroll,
    );
}
