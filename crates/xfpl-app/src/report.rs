// Assembles everything the dashboard shows from one snapshot of players.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use xfpl_core::config::Config;
use xfpl_core::player::PlayerStatRecord;
use xfpl_football::analysis::{self, Summary};
use xfpl_football::engine::{ExpectedScoreRecord, ScoreBatch, ValidationError};

/// Over/under rankings for one minutes pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolRanking {
    pub size: usize,
    pub over: Vec<ExpectedScoreRecord>,
    pub under: Vec<ExpectedScoreRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub fetched_at: DateTime<Utc>,
    pub source: String,
    /// Rounded scored players in input order.
    pub players: Vec<ExpectedScoreRecord>,
    pub summary: Summary,
    pub regular_minutes: u32,
    pub regular: PoolRanking,
    pub rotation: PoolRanking,
    pub buy_threshold: Option<f64>,
    pub buy_targets: Vec<ExpectedScoreRecord>,
    pub sell_candidates: Vec<ExpectedScoreRecord>,
    pub failures: Vec<ValidationError>,
}

fn owned(records: Vec<&ExpectedScoreRecord>) -> Vec<ExpectedScoreRecord> {
    records.into_iter().cloned().collect()
}

/// Full over/under lists for a pool; only the transfer lists are capped.
fn rank(pool: &[&ExpectedScoreRecord]) -> PoolRanking {
    PoolRanking {
        size: pool.len(),
        over: owned(analysis::overperformers(pool)),
        under: owned(analysis::underperformers(pool)),
    }
}

/// Score every player and derive the summary, rankings and transfer lists.
/// Players that fail validation are logged and listed, never dropped silently.
pub fn build_report(
    players: &[PlayerStatRecord],
    config: &Config,
    fetched_at: DateTime<Utc>,
    source: String,
) -> Report {
    let batch = ScoreBatch::score(players, &config.scoring);
    for failure in &batch.failures {
        warn!("skipping player: {}", failure);
    }

    let scored: Vec<ExpectedScoreRecord> = batch.scored.iter().map(|r| r.rounded()).collect();
    let analysis_cfg = &config.analysis;

    let pools = analysis::partition_by_minutes(&scored, analysis_cfg.regular_minutes);
    let regular = rank(&pools.regular);
    let rotation = rank(&pools.rotation);

    let buys = analysis::buy_targets(&pools.regular, analysis_cfg);
    let buy_threshold = buys.xfpl90_threshold;
    // Transfer lists arrive already capped at max_recommendations.
    let buy_targets = owned(buys.players);
    let sell_candidates = owned(analysis::sell_candidates(&pools.regular, analysis_cfg));

    let summary = analysis::summarize(&scored);
    info!(
        scored = scored.len(),
        failed = batch.failures.len(),
        regular = regular.size,
        rotation = rotation.size,
        buys = buy_targets.len(),
        sells = sell_candidates.len(),
        "report built"
    );

    Report {
        fetched_at,
        source,
        summary,
        regular_minutes: analysis_cfg.regular_minutes,
        regular,
        rotation,
        buy_threshold,
        buy_targets,
        sell_candidates,
        failures: batch.failures,
        players: scored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, minutes: u32, starts: u32, xg: Option<f64>, points: i32) -> PlayerStatRecord {
        PlayerStatRecord {
            id,
            name: format!("P{}", id),
            team: "TST".into(),
            element_type: 3,
            minutes,
            starts,
            expected_goals: xg,
            expected_assists: Some(1.0),
            expected_goals_conceded: Some(minutes as f64 / 90.0),
            bps: Some(100),
            clean_sheets: 0,
            bonus: 0,
            total_points: points,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn failures_are_listed_and_rest_is_scored() {
        let players = vec![
            player(1, 1800, 20, Some(5.0), 100),
            player(2, 900, 10, None, 40),
            player(3, 300, 2, Some(0.5), 10),
        ];
        let report = build_report(&players, &Config::default(), now(), "test".into());

        assert_eq!(report.players.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].player_id(), 2);
        assert_eq!(report.summary.total_players, 2);
        assert_eq!(report.source, "test");
        assert_eq!(report.fetched_at, now());
    }

    #[test]
    fn pools_split_on_regular_minutes() {
        let players = vec![
            player(1, 1800, 20, Some(5.0), 100),
            player(2, 900, 10, Some(2.0), 40),
            player(3, 899, 10, Some(2.0), 40),
        ];
        let report = build_report(&players, &Config::default(), now(), "test".into());
        assert_eq!(report.regular_minutes, 900);
        assert_eq!(report.regular.size, 2);
        assert_eq!(report.rotation.size, 1);
        let rotation_ids: Vec<u32> = report
            .rotation
            .over
            .iter()
            .chain(report.rotation.under.iter())
            .map(|r| r.player.id)
            .collect();
        assert!(rotation_ids.iter().all(|&id| id == 3));
    }

    #[test]
    fn records_are_rounded() {
        let players = vec![player(1, 1000, 11, Some(3.333), 60)];
        let report = build_report(&players, &Config::default(), now(), "test".into());
        let r = &report.players[0];
        assert!((r.xfpl * 100.0 - (r.xfpl * 100.0).round()).abs() < 1e-6);
        assert_eq!(r.matches_played, 11.1);
    }

    #[test]
    fn pool_rankings_list_every_player() {
        let players: Vec<PlayerStatRecord> = (1..=30)
            .map(|id| player(id, 1800, 20, Some(1.0), 200 + id as i32))
            .collect();
        let config = Config::default();
        assert!(config.analysis.max_recommendations < 30);
        let report = build_report(&players, &config, now(), "test".into());

        let overperforming = report.players.iter().filter(|r| r.delta >= 0.0).count();
        assert_eq!(overperforming, 30);
        assert_eq!(report.regular.size, 30);
        assert_eq!(report.regular.over.len(), overperforming);
        assert_eq!(report.regular.over[0].player.id, 30);
        assert!(report.regular.under.is_empty());
    }

    #[test]
    fn only_transfer_lists_are_capped() {
        // Low points against a high xFPL: every player underperforms.
        let players: Vec<PlayerStatRecord> = (1..=30)
            .map(|id| player(id, 1800 + id, 20, Some(8.0), 10 + id as i32))
            .collect();
        let mut config = Config::default();
        config.analysis.max_recommendations = 5;
        config.analysis.buy.min_points = 0;
        config.analysis.buy.xfpl90_quantile = 0.0;
        let report = build_report(&players, &config, now(), "test".into());

        assert_eq!(report.regular.under.len(), 30);
        assert!(report.buy_targets.len() <= 5);
        assert!(!report.buy_targets.is_empty());
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let report = build_report(&[], &Config::default(), now(), "test".into());
        assert!(report.players.is_empty());
        assert_eq!(report.summary.avg_delta, None);
        assert_eq!(report.buy_threshold, None);
        assert!(report.buy_targets.is_empty());
        assert!(report.sell_candidates.is_empty());
    }
}
