// Failures tab: players the engine refused to score, with the reason.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;
use xfpl_football::engine::ValidationError;

use super::performance::clamp_scroll;
use super::titled_block;

pub fn render(frame: &mut Frame, area: Rect, failures: &[ValidationError], scroll: usize) {
    let header = Row::new(vec![Cell::from("ID"), Cell::from("Name"), Cell::from("Reason")]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = failures
        .iter()
        .skip(clamp_scroll(scroll, failures.len()))
        .map(|f| {
            Row::new(vec![
                Cell::from(format!("{}", f.player_id())),
                Cell::from(f.player_name().to_string()),
                Cell::from(f.to_string()).style(Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(20),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!("Validation failures ({})", failures.len())));
    frame.render_widget(table, area);
}
