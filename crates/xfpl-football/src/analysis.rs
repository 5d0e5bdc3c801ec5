// Presentation analysis over scored players: minutes pools, over/under
// performer rankings, transfer recommendations and summary figures.

use std::cmp::Ordering;

use xfpl_core::config::AnalysisConfig;

use crate::engine::ExpectedScoreRecord;

// ---------------------------------------------------------------------------
// Pools
// ---------------------------------------------------------------------------

/// Players split by a minutes threshold. Input order is kept in both pools.
#[derive(Debug, Clone, Default)]
pub struct MinutesPartition<'a> {
    /// Minutes at or above the threshold.
    pub regular: Vec<&'a ExpectedScoreRecord>,
    pub rotation: Vec<&'a ExpectedScoreRecord>,
}

pub fn partition_by_minutes(
    records: &[ExpectedScoreRecord],
    regular_minutes: u32,
) -> MinutesPartition<'_> {
    let (regular, rotation): (Vec<_>, Vec<_>) = records
        .iter()
        .partition(|r| r.player.minutes >= regular_minutes);
    MinutesPartition { regular, rotation }
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

fn by_delta(a: &ExpectedScoreRecord, b: &ExpectedScoreRecord) -> Ordering {
    a.delta.partial_cmp(&b.delta).unwrap_or(Ordering::Equal)
}

/// Players with delta >= 0, largest delta first.
pub fn overperformers<'a>(records: &[&'a ExpectedScoreRecord]) -> Vec<&'a ExpectedScoreRecord> {
    let mut over: Vec<&ExpectedScoreRecord> =
        records.iter().copied().filter(|r| r.delta >= 0.0).collect();
    over.sort_by(|a, b| by_delta(b, a));
    over
}

/// Players with delta <= 0, most negative delta first.
pub fn underperformers<'a>(records: &[&'a ExpectedScoreRecord]) -> Vec<&'a ExpectedScoreRecord> {
    let mut under: Vec<&ExpectedScoreRecord> =
        records.iter().copied().filter(|r| r.delta <= 0.0).collect();
    under.sort_by(|a, b| by_delta(a, b));
    under
}

// ---------------------------------------------------------------------------
// Quantiles
// ---------------------------------------------------------------------------

/// Nearest-rank quantile of the finite values. Returns `None` when there are
/// no finite values or `q` is outside [0, 1].
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

// ---------------------------------------------------------------------------
// Transfer recommendations
// ---------------------------------------------------------------------------

/// Buy targets together with the xFPL90 cut-off they were selected against.
#[derive(Debug, Clone, Default)]
pub struct BuyTargets<'a> {
    pub xfpl90_threshold: Option<f64>,
    pub players: Vec<&'a ExpectedScoreRecord>,
}

/// Underperformers whose xFPL90 sits above the configured quantile of the
/// pool. Sorted by delta ascending, ties broken by xFPL90 descending.
pub fn buy_targets<'a>(
    pool: &[&'a ExpectedScoreRecord],
    config: &AnalysisConfig,
) -> BuyTargets<'a> {
    let xfpl90s: Vec<f64> = pool.iter().map(|r| r.xfpl90).collect();
    let Some(threshold) = quantile(&xfpl90s, config.buy.xfpl90_quantile) else {
        return BuyTargets::default();
    };

    let criteria = &config.buy;
    let mut players: Vec<&ExpectedScoreRecord> = pool
        .iter()
        .copied()
        .filter(|r| {
            r.xfpl90 > threshold
                && r.player.total_points > criteria.min_points
                && r.delta < criteria.max_delta
                && r.player.minutes > criteria.min_minutes
        })
        .collect();
    players.sort_by(|a, b| {
        by_delta(a, b).then_with(|| b.xfpl90.partial_cmp(&a.xfpl90).unwrap_or(Ordering::Equal))
    });
    players.truncate(config.max_recommendations);

    BuyTargets {
        xfpl90_threshold: Some(threshold),
        players,
    }
}

/// Overperformers with weak per-90 numbers, largest delta first.
pub fn sell_candidates<'a>(
    pool: &[&'a ExpectedScoreRecord],
    config: &AnalysisConfig,
) -> Vec<&'a ExpectedScoreRecord> {
    let criteria = &config.sell;
    let mut players: Vec<&ExpectedScoreRecord> = pool
        .iter()
        .copied()
        .filter(|r| {
            r.xfpl90 < criteria.max_xfpl90
                && r.player.total_points > criteria.min_points
                && r.delta > criteria.min_delta
                && r.performance_pct > criteria.min_performance_pct
        })
        .collect();
    players.sort_by(|a, b| by_delta(b, a));
    players.truncate(config.max_recommendations);
    players
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total_players: usize,
    pub avg_delta: Option<f64>,
    pub max_delta: Option<f64>,
    pub min_delta: Option<f64>,
}

pub fn summarize(records: &[ExpectedScoreRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }
    let deltas = records.iter().map(|r| r.delta);
    let sum: f64 = deltas.clone().sum();
    Summary {
        total_players: records.len(),
        avg_delta: Some(sum / records.len() as f64),
        max_delta: deltas.clone().reduce(f64::max),
        min_delta: deltas.reduce(f64::min),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
