// Application state and orchestration logic.
//
// Owns the cached player source and the latest report. Reacts to user
// commands from the TUI and pushes UI updates back over a channel.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use xfpl_core::config::Config;
use xfpl_football::export::{write_csv, ExportError};

use crate::cache::CachedSource;
use crate::protocol::{UiUpdate, UserCommand};
use crate::report::{build_report, Report};
use crate::source::PlayerSource;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct AppState<S> {
    pub config: Config,
    pub cache: CachedSource<S>,
    pub report: Option<Report>,
}

impl<S: PlayerSource> AppState<S> {
    pub fn new(config: Config, source: S) -> Self {
        let cache = CachedSource::new(source, config.cache_ttl_secs);
        AppState {
            config,
            cache,
            report: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application loop.
///
/// Builds an initial report, then serves commands until `Quit` arrives or
/// either channel closes.
pub async fn run<S: PlayerSource>(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState<S>,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    if !refresh(&mut state, &ui_tx).await {
        info!("UI channel closed, shutting down");
        return Ok(());
    }

    while let Some(cmd) = cmd_rx.recv().await {
        let ui_open = match cmd {
            UserCommand::Quit => {
                info!("Quit command received, shutting down");
                return Ok(());
            }
            UserCommand::Refresh => refresh(&mut state, &ui_tx).await,
            UserCommand::ForceRefresh => {
                state.cache.invalidate();
                refresh(&mut state, &ui_tx).await
            }
            UserCommand::Export => export(&state, &ui_tx).await,
        };
        if !ui_open {
            info!("UI channel closed, shutting down");
            return Ok(());
        }
    }

    info!("Command channel closed, shutting down");
    Ok(())
}

/// Fetch (or reuse) a snapshot and publish a new report. Returns `false`
/// once the UI side has gone away.
async fn refresh<S: PlayerSource>(state: &mut AppState<S>, ui_tx: &mpsc::Sender<UiUpdate>) -> bool {
    if ui_tx.send(UiUpdate::Loading).await.is_err() {
        return false;
    }

    let update = match state.cache.get(Utc::now()).await {
        Ok(snapshot) => {
            let report = build_report(
                &snapshot.players,
                &state.config,
                snapshot.fetched_at,
                state.cache.source().describe(),
            );
            state.report = Some(report.clone());
            UiUpdate::ReportReady(Box::new(report))
        }
        Err(e) => {
            error!("fetch failed: {}", e);
            UiUpdate::FetchFailed(e.to_string())
        }
    };
    ui_tx.send(update).await.is_ok()
}

async fn export<S: PlayerSource>(state: &AppState<S>, ui_tx: &mpsc::Sender<UiUpdate>) -> bool {
    let update = match &state.report {
        None => {
            warn!("export requested before any report was built");
            UiUpdate::ExportFailed("no report to export yet".into())
        }
        Some(report) => {
            match export_report(report, Path::new(&state.config.export_dir), Utc::now()) {
                Ok(path) => UiUpdate::ExportComplete(path),
                Err(e) => {
                    error!("export failed: {}", e);
                    UiUpdate::ExportFailed(e.to_string())
                }
            }
        }
    };
    ui_tx.send(update).await.is_ok()
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("xfpl-{}.csv", now.format("%Y%m%dT%H%M%SZ"))
}

/// Write the report's scored players to a timestamped CSV under `dir`,
/// creating the directory if needed.
pub fn export_report(report: &Report, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    let file = File::create(&path)?;
    let rows = write_csv(&report.players, file)?;
    info!("exported {} players to {}", rows, path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use xfpl_core::player::PlayerStatRecord;

    struct StaticSource {
        players: Vec<PlayerStatRecord>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PlayerSource for StaticSource {
        async fn fetch_players(&self) -> Result<Vec<PlayerStatRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.players.clone())
        }

        fn describe(&self) -> String {
            "static".into()
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl PlayerSource for BrokenSource {
        async fn fetch_players(&self) -> Result<Vec<PlayerStatRecord>, FetchError> {
            Err(FetchError::Status {
                url: "broken".into(),
                status: 500,
            })
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    fn player(id: u32) -> PlayerStatRecord {
        PlayerStatRecord {
            id,
            name: format!("P{}", id),
            team: "TST".into(),
            element_type: 2,
            minutes: 900 + id,
            starts: 10,
            expected_goals: Some(0.5),
            expected_assists: Some(0.5),
            expected_goals_conceded: Some(10.0),
            bps: Some(200),
            clean_sheets: 3,
            bonus: 2,
            total_points: 40,
        }
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("xfpl_app_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn static_state(export_dir: &Path) -> (AppState<StaticSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StaticSource {
            players: vec![player(1), player(2)],
            calls: calls.clone(),
        };
        let mut config = Config::default();
        config.export_dir = export_dir.display().to_string();
        (AppState::new(config, source), calls)
    }

    async fn expect_report(ui_rx: &mut mpsc::Receiver<UiUpdate>) -> Report {
        assert!(matches!(ui_rx.recv().await, Some(UiUpdate::Loading)));
        match ui_rx.recv().await {
            Some(UiUpdate::ReportReady(report)) => *report,
            other => panic!("expected ReportReady, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn initial_report_then_cached_refresh() {
        let dir = scratch("refresh");
        let (state, calls) = static_state(&dir);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));

        let report = expect_report(&mut ui_rx).await;
        assert_eq!(report.players.len(), 2);
        assert_eq!(report.source, "static");

        cmd_tx.send(UserCommand::Refresh).await.unwrap();
        expect_report(&mut ui_rx).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cmd_tx.send(UserCommand::ForceRefresh).await.unwrap();
        expect_report(&mut ui_rx).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn export_writes_csv() {
        let dir = scratch("export");
        let (state, _) = static_state(&dir);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));

        expect_report(&mut ui_rx).await;
        cmd_tx.send(UserCommand::Export).await.unwrap();
        let path = match ui_rx.recv().await {
            Some(UiUpdate::ExportComplete(path)) => path,
            other => panic!("expected ExportComplete, got {:?}", other),
        };
        assert!(path.starts_with(&dir));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);

        drop(cmd_tx);
        handle.await.unwrap().unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn fetch_failure_reported_and_export_refused() {
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (ui_tx, mut ui_rx) = mpsc::channel(8);
        let state = AppState::new(Config::default(), BrokenSource);
        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));

        assert!(matches!(ui_rx.recv().await, Some(UiUpdate::Loading)));
        match ui_rx.recv().await {
            Some(UiUpdate::FetchFailed(msg)) => assert!(msg.contains("500")),
            other => panic!("expected FetchFailed, got {:?}", other),
        }

        cmd_tx.send(UserCommand::Export).await.unwrap();
        assert!(matches!(
            ui_rx.recv().await,
            Some(UiUpdate::ExportFailed(_))
        ));

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        handle.await.unwrap().unwrap();
    }

    #[test]
    fn export_file_name_is_utc_timestamp() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(export_file_name(now), "xfpl-20231114T221320Z.csv");
    }
}
