// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// task, or into local ViewState mutations (tab switching, scrolling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use xfpl_app::protocol::{TabId, UserCommand};

use super::ViewState;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app task, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Press and Release on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('1') => switch_tab(view_state, TabId::Regular),
        KeyCode::Char('2') => switch_tab(view_state, TabId::Rotation),
        KeyCode::Char('3') => switch_tab(view_state, TabId::Transfers),
        KeyCode::Char('4') => switch_tab(view_state, TabId::Failures),
        KeyCode::Tab => {
            let next = (view_state.active_tab.index() + 1) % TabId::ALL.len();
            switch_tab(view_state, TabId::ALL[next])
        }
        KeyCode::BackTab => {
            let len = TabId::ALL.len();
            let prev = (view_state.active_tab.index() + len - 1) % len;
            switch_tab(view_state, TabId::ALL[prev])
        }

        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            view_state.scroll_offset.remove(&view_state.active_tab);
            None
        }

        KeyCode::Char('r') => {
            view_state.message = None;
            Some(UserCommand::Refresh)
        }
        KeyCode::Char('R') => {
            view_state.message = None;
            Some(UserCommand::ForceRefresh)
        }
        KeyCode::Char('e') => Some(UserCommand::Export),
        KeyCode::Char('q') => Some(UserCommand::Quit),

        _ => None,
    }
}

fn switch_tab(view_state: &mut ViewState, tab: TabId) -> Option<UserCommand> {
    view_state.active_tab = tab;
    None
}

/// Largest useful offset for the active tab: the longest table it shows,
/// minus one.
fn max_offset(view_state: &ViewState) -> usize {
    let Some(report) = &view_state.report else {
        return 0;
    };
    let longest = match view_state.active_tab {
        TabId::Regular => report.regular.over.len().max(report.regular.under.len()),
        TabId::Rotation => report.rotation.over.len().max(report.rotation.under.len()),
        TabId::Transfers => report.buy_targets.len().max(report.sell_candidates.len()),
        TabId::Failures => report.failures.len(),
    };
    longest.saturating_sub(1)
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_tab)
        .or_insert(0);
    *offset = offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let max = max_offset(view_state);
    let offset = view_state
        .scroll_offset
        .entry(view_state.active_tab)
        .or_insert(0);
    *offset = offset.saturating_add(lines).min(max);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
