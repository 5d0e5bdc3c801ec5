// Transfers tab: buy targets (unlucky, strong underlying numbers) next to
// sell candidates (lucky, weak underlying numbers). Both drawn from the
// regular-minutes pool.

use ratatui::Frame;
use xfpl_app::report::Report;

use super::performance::render_table;
use crate::tui::layout::AppLayout;

pub fn buy_title(threshold: Option<f64>) -> String {
    match threshold {
        Some(t) => format!("Buy targets (xFPL90 > {:.2})", t),
        None => "Buy targets".to_string(),
    }
}

pub fn render(frame: &mut Frame, layout: &AppLayout, report: &Report, scroll: usize) {
    render_table(
        frame,
        layout.left,
        buy_title(report.buy_threshold),
        &report.buy_targets,
        scroll,
    );
    render_table(
        frame,
        layout.right,
        "Sell candidates".to_string(),
        &report.sell_candidates,
        scroll,
    );
}
