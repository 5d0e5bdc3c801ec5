// TUI widget modules for each dashboard panel.

pub mod failures;
pub mod performance;
pub mod status_bar;
pub mod summary;
pub mod transfers;

use ratatui::widgets::{Block, Borders};

pub(crate) fn titled_block<'a>(title: impl Into<ratatui::text::Line<'a>>) -> Block<'a> {
    Block::default().borders(Borders::ALL).title(title)
}
