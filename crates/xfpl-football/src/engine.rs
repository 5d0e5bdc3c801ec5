// Expected-points engine: five additive sub-models, per-90 rates and the
// comparison against actual points.
//
// Every output record is a pure function of one input record and the
// scoring constants. Rounding is a separate display step (`rounded`).

use thiserror::Error;
use xfpl_core::config::ScoringConfig;
use xfpl_core::player::{PlayerStatRecord, Position};

const MINUTES_PER_MATCH: f64 = 90.0;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a single player record could not be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("player {id} ({name}) has zero minutes; matches played would be zero")]
    ZeroMinutes { id: u32, name: String },

    #[error("player {id} ({name}) is missing `{field}`")]
    MissingStat {
        id: u32,
        name: String,
        field: &'static str,
    },

    #[error("player {id} ({name}) has non-finite `{field}`: {value}")]
    NonFiniteStat {
        id: u32,
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("player {id} ({name}) has negative `{field}`: {value}")]
    NegativeStat {
        id: u32,
        name: String,
        field: &'static str,
        value: f64,
    },
}

impl ValidationError {
    pub fn player_id(&self) -> u32 {
        match self {
            ValidationError::ZeroMinutes { id, .. }
            | ValidationError::MissingStat { id, .. }
            | ValidationError::NonFiniteStat { id, .. }
            | ValidationError::NegativeStat { id, .. } => *id,
        }
    }

    pub fn player_name(&self) -> &str {
        match self {
            ValidationError::ZeroMinutes { name, .. }
            | ValidationError::MissingStat { name, .. }
            | ValidationError::NonFiniteStat { name, .. }
            | ValidationError::NegativeStat { name, .. } => name,
        }
    }
}

// ---------------------------------------------------------------------------
// Output record
// ---------------------------------------------------------------------------

/// A player record augmented with expected-points components and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedScoreRecord {
    pub player: PlayerStatRecord,
    /// Minutes / 90, a continuous full-match equivalent.
    pub matches_played: f64,
    pub xg_points: f64,
    pub xa_points: f64,
    pub xcs_points: f64,
    pub xbonus_points: f64,
    pub xappearance_points: f64,
    /// Sum of the five sub-components.
    pub xfpl: f64,
    pub xg90: f64,
    pub xa90: f64,
    pub xfpl90: f64,
    /// Expected goal involvement, xG + xA.
    pub xgi: f64,
    pub xgi90: f64,
    /// Actual points minus xFPL; positive means outperforming the model.
    pub delta: f64,
    /// Actual points as a percentage of xFPL, 0.0 when undefined.
    pub performance_pct: f64,
}

impl ExpectedScoreRecord {
    /// Display view: derived metrics rounded to their display precision.
    /// Sub-components are left as computed.
    pub fn rounded(&self) -> ExpectedScoreRecord {
        ExpectedScoreRecord {
            matches_played: round_to(self.matches_played, 1),
            xfpl: round_to(self.xfpl, 2),
            xg90: round_to(self.xg90, 3),
            xa90: round_to(self.xa90, 3),
            xgi: round_to(self.xgi, 3),
            xgi90: round_to(self.xgi90, 3),
            xfpl90: round_to(self.xfpl90, 2),
            delta: round_to(self.delta, 2),
            performance_pct: round_to(self.performance_pct, 1),
            ..self.clone()
        }
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Validated inputs
// ---------------------------------------------------------------------------

/// The underlying statistics of a record once presence and range have been
/// checked.
#[derive(Debug, Clone, Copy)]
struct UnderlyingStats {
    xg: f64,
    xa: f64,
    xgc: f64,
    bps: i32,
}

fn require_expected(
    record: &PlayerStatRecord,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, ValidationError> {
    let Some(value) = value else {
        return Err(ValidationError::MissingStat {
            id: record.id,
            name: record.name.clone(),
            field,
        });
    };
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteStat {
            id: record.id,
            name: record.name.clone(),
            field,
            value,
        });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeStat {
            id: record.id,
            name: record.name.clone(),
            field,
            value,
        });
    }
    Ok(value)
}

fn validate(record: &PlayerStatRecord) -> Result<UnderlyingStats, ValidationError> {
    if record.minutes == 0 {
        return Err(ValidationError::ZeroMinutes {
            id: record.id,
            name: record.name.clone(),
        });
    }
    let xg = require_expected(record, "expected_goals", record.expected_goals)?;
    let xa = require_expected(record, "expected_assists", record.expected_assists)?;
    let xgc = require_expected(
        record,
        "expected_goals_conceded",
        record.expected_goals_conceded,
    )?;
    let bps = record.bps.ok_or_else(|| ValidationError::MissingStat {
        id: record.id,
        name: record.name.clone(),
        field: "bps",
    })?;
    Ok(UnderlyingStats { xg, xa, xgc, bps })
}

// ---------------------------------------------------------------------------
// Sub-models
// ---------------------------------------------------------------------------

/// Probability of conceding zero goals in a match, treating goals conceded as
/// Poisson with the given per-match rate.
pub fn clean_sheet_probability(xgc_per_match: f64) -> f64 {
    (-xgc_per_match).exp()
}

fn goal_points(xg: f64, position: Option<Position>, scoring: &ScoringConfig) -> f64 {
    position.map_or(0.0, |p| xg * scoring.goal_points.for_position(p))
}

fn assist_points(xa: f64, scoring: &ScoringConfig) -> f64 {
    xa * scoring.assist_points
}

/// Expected clean sheets are accumulated match by match: the per-match
/// probability from the average xGC, times matches played.
fn clean_sheet_points(
    xgc: f64,
    matches_played: f64,
    position: Option<Position>,
    scoring: &ScoringConfig,
) -> f64 {
    let Some(position) = position else {
        return 0.0;
    };
    if position == Position::Forward {
        return 0.0;
    }
    let expected_clean_sheets = clean_sheet_probability(xgc / matches_played) * matches_played;
    expected_clean_sheets * scoring.clean_sheet_points.for_position(position)
}

/// Estimated from BPS rather than awarded bonus. Negative BPS is not clamped.
fn bonus_points(bps: i32, matches_played: f64, scoring: &ScoringConfig) -> f64 {
    let bps_per_match = bps as f64 / matches_played;
    (bps_per_match / 100.0) * scoring.bonus_per_100_bps_per_match * matches_played
}

/// Starts earn the full appearance award. Minutes beyond those the starts
/// account for are treated as substitute time and credited linearly.
fn appearance_points(
    minutes: u32,
    starts: u32,
    position: Option<Position>,
    scoring: &ScoringConfig,
) -> f64 {
    if position.is_none() {
        return 0.0;
    }
    let a = &scoring.appearance;
    let starts = starts as f64;
    let sub_minutes = minutes as f64 - starts * a.start_minutes;
    let sub_points = (sub_minutes / a.sub_minutes_per_point * a.sub_points).max(0.0);
    (starts * a.start_points + sub_points).max(0.0)
}

fn per_90(value: f64, minutes: f64) -> f64 {
    value / minutes * MINUTES_PER_MATCH
}

/// Actual points as a percentage of xFPL; 0.0 when xFPL is zero or the ratio
/// is not finite.
pub fn performance_pct(total_points: i32, xfpl: f64) -> f64 {
    if xfpl == 0.0 {
        return 0.0;
    }
    let pct = total_points as f64 / xfpl * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Public operations
// ---------------------------------------------------------------------------

/// Score one player.
pub fn compute_expected_score(
    record: &PlayerStatRecord,
    scoring: &ScoringConfig,
) -> Result<ExpectedScoreRecord, ValidationError> {
    let stats = validate(record)?;
    let position = record.position();
    let minutes = record.minutes as f64;
    let matches_played = minutes / MINUTES_PER_MATCH;

    let xg_points = goal_points(stats.xg, position, scoring);
    let xa_points = assist_points(stats.xa, scoring);
    let xcs_points = clean_sheet_points(stats.xgc, matches_played, position, scoring);
    let xbonus_points = bonus_points(stats.bps, matches_played, scoring);
    let xappearance_points = appearance_points(record.minutes, record.starts, position, scoring);

    let xfpl = xg_points + xa_points + xcs_points + xbonus_points + xappearance_points;
    let xgi = stats.xg + stats.xa;

    Ok(ExpectedScoreRecord {
        player: record.clone(),
        matches_played,
        xg_points,
        xa_points,
        xcs_points,
        xbonus_points,
        xappearance_points,
        xfpl,
        xg90: per_90(stats.xg, minutes),
        xa90: per_90(stats.xa, minutes),
        xfpl90: per_90(xfpl, minutes),
        xgi,
        xgi90: per_90(xgi, minutes),
        delta: record.total_points as f64 - xfpl,
        performance_pct: performance_pct(record.total_points, xfpl),
    })
}

/// Score every player. The result has one entry per input record, in input
/// order; records that fail validation yield an `Err` in their slot.
pub fn compute_expected_scores(
    records: &[PlayerStatRecord],
    scoring: &ScoringConfig,
) -> Vec<Result<ExpectedScoreRecord, ValidationError>> {
    records
        .iter()
        .map(|r| compute_expected_score(r, scoring))
        .collect()
}

/// Scored records and validation failures, split apart with relative order
/// preserved on both sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBatch {
    pub scored: Vec<ExpectedScoreRecord>,
    pub failures: Vec<ValidationError>,
}

impl ScoreBatch {
    pub fn from_results<I>(results: I) -> ScoreBatch
    where
        I: IntoIterator<Item = Result<ExpectedScoreRecord, ValidationError>>,
    {
        let mut batch = ScoreBatch::default();
        for result in results {
            match result {
                Ok(record) => batch.scored.push(record),
                Err(e) => batch.failures.push(e),
            }
        }
        batch
    }

    /// Score `records` and split the outcome.
    pub fn score(records: &[PlayerStatRecord], scoring: &ScoringConfig) -> ScoreBatch {
        ScoreBatch::from_results(compute_expected_scores(records, scoring))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
