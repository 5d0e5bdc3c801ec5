// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest report plus local view
// concerns (tab, scroll, status messages). The app task pushes `UiUpdate`
// messages over an mpsc channel; the TUI applies them and re-renders at
// ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;
use xfpl_app::protocol::{TabId, UiUpdate, UserCommand};
use xfpl_app::report::Report;

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ViewState {
    pub report: Option<Report>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Last fetch error; the previous report stays on screen.
    pub fetch_error: Option<String>,
    /// Transient message, e.g. the outcome of an export.
    pub message: Option<String>,
    pub active_tab: TabId,
    /// Per-tab scroll offsets.
    pub scroll_offset: HashMap<TabId, usize>,
}

impl ViewState {
    pub fn scroll(&self, tab: TabId) -> usize {
        self.scroll_offset.get(&tab).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Loading => {
            state.loading = true;
        }
        UiUpdate::ReportReady(report) => {
            state.report = Some(*report);
            state.loading = false;
            state.fetch_error = None;
        }
        UiUpdate::FetchFailed(message) => {
            state.loading = false;
            state.fetch_error = Some(message);
        }
        UiUpdate::ExportComplete(path) => {
            state.message = Some(format!("Exported to {}", path.display()));
        }
        UiUpdate::ExportFailed(message) => {
            state.message = Some(format!("Export failed: {}", message));
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::summary::render(frame, layout.summary, state);
    render_main_panel(frame, &layout, state);
    render_help_bar(frame, &layout);
}

fn render_main_panel(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let Some(report) = &state.report else {
        let text = if state.loading {
            "Fetching player data..."
        } else {
            "No data loaded. Press r to retry."
        };
        frame.render_widget(
            Paragraph::new(text).block(widgets::titled_block("xFPL")),
            layout.main_panel,
        );
        return;
    };

    let scroll = state.scroll(state.active_tab);
    match state.active_tab {
        TabId::Regular => widgets::performance::render_pool(
            frame,
            layout,
            &report.regular,
            &format!(">= {} min", report.regular_minutes),
            scroll,
        ),
        TabId::Rotation => widgets::performance::render_pool(
            frame,
            layout,
            &report.rotation,
            &format!("< {} min", report.regular_minutes),
            scroll,
        ),
        TabId::Transfers => widgets::transfers::render(frame, layout, report, scroll),
        TabId::Failures => {
            widgets::failures::render(frame, layout.main_panel, &report.failures, scroll)
        }
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | 1-4:Tabs | j/k:Scroll | r:Refresh | R:Force refresh | e:Export CSV";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app task goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App task finished.
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    ratatui::restore();
    info!("TUI closed");
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
