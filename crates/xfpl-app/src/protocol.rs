// Messages exchanged between the app task and the TUI.

use std::path::PathBuf;

use crate::report::Report;

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    #[default]
    Regular,
    Rotation,
    Transfers,
    Failures,
}

impl TabId {
    pub const ALL: [TabId; 4] = [
        TabId::Regular,
        TabId::Rotation,
        TabId::Transfers,
        TabId::Failures,
    ];

    pub fn title(self) -> &'static str {
        match self {
            TabId::Regular => "Regular",
            TabId::Rotation => "Rotation",
            TabId::Transfers => "Transfers",
            TabId::Failures => "Failures",
        }
    }

    pub fn index(self) -> usize {
        match self {
            TabId::Regular => 0,
            TabId::Rotation => 1,
            TabId::Transfers => 2,
            TabId::Failures => 3,
        }
    }
}

/// App task -> TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Loading,
    ReportReady(Box<Report>),
    FetchFailed(String),
    ExportComplete(PathBuf),
    ExportFailed(String),
}

/// TUI -> app task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Rebuild the report, reusing a fresh cached snapshot.
    Refresh,
    /// Drop the cache and fetch again.
    ForceRefresh,
    /// Write the current report's players to CSV.
    Export,
    Quit,
}
