// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Summary (3 rows)                                  |
// +-------------------------+------------------------+
// | Left table (50%)         | Right table (50%)      |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub summary: Rect,
    /// The whole middle section, for single-table tabs.
    pub main_panel: Rect,
    pub left: Rect,
    pub right: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // summary
            Constraint::Min(6),    // tables
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let main_panel = vertical[2];
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_panel);

    AppLayout {
        status_bar: vertical[0],
        summary: vertical[1],
        main_panel,
        left: horizontal[0],
        right: horizontal[1],
        help_bar: vertical[3],
    }
}
