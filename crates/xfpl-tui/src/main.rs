// xFPL dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the player source (FPL API, or a saved bootstrap file)
// 4. Create mpsc channels
// 5. Spawn app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit
//
// Usage: xfpl [BOOTSTRAP_JSON]

use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};
use xfpl_app::app::{self, AppState};
use xfpl_app::source::{FileSource, HttpSource, PlayerSource};
use xfpl_core::config;
use xfpl_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("xfpl starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: regular pool >= {} min, cache ttl {}s",
        config.analysis.regular_minutes, config.cache_ttl_secs
    );

    let source: Box<dyn PlayerSource> = match std::env::args().nth(1) {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(
            HttpSource::from_config(&config.source).context("failed to build HTTP client")?,
        ),
    };
    info!("Player source: {}", source.describe());

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(64);

    let app_state = AppState::new(config, source);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    let tui_result = tui::run(ui_rx, cmd_tx).await;
    if let Err(e) = &tui_result {
        error!("TUI error: {}", e);
    }

    // The app task exits once the command channel closes.
    let _ = tokio::time::timeout(Duration::from_secs(5), app_handle).await;

    info!("xfpl shut down cleanly");
    tui_result
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("xfpl.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xfpl=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
