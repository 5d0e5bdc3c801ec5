// FPL bootstrap document parsing.
//
// The public `bootstrap-static` endpoint returns every player ("elements")
// and every club ("teams") in one JSON document. Expected statistics are
// transmitted as decimal strings ("1.23").

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{info, warn};
use xfpl_core::player::PlayerStatRecord;

const UNKNOWN_TEAM: &str = "Unknown";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid bootstrap JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawBootstrap {
    elements: Vec<RawElement>,
    teams: Vec<RawTeam>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    id: u32,
    short_name: String,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    id: u32,
    web_name: String,
    team: u32,
    element_type: u8,
    total_points: i32,
    minutes: u32,
    #[serde(default)]
    starts: u32,
    #[serde(default)]
    expected_goals: Option<RawDecimal>,
    #[serde(default)]
    expected_assists: Option<RawDecimal>,
    #[serde(default)]
    expected_goals_conceded: Option<RawDecimal>,
    #[serde(default)]
    bps: Option<i32>,
    #[serde(default)]
    clean_sheets: u32,
    #[serde(default)]
    bonus: u32,
}

/// A decimal that may arrive as a JSON string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a raw decimal to `f64`. Unparseable text is logged and treated as
/// absent so the engine reports the player instead of scoring it as zero.
fn decimal(raw: Option<RawDecimal>, player: &str, field: &str) -> Option<f64> {
    match raw? {
        RawDecimal::Number(v) => Some(v),
        RawDecimal::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("player '{}': unparseable {} value '{}'", player, field, s);
                None
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a bootstrap document into player records.
///
/// Only players who have played (minutes > 0) are returned, in document
/// order. Team ids resolve to the club short name.
pub fn parse_bootstrap(json: &str) -> Result<Vec<PlayerStatRecord>, FetchError> {
    let raw: RawBootstrap = serde_json::from_str(json)?;

    let teams: HashMap<u32, String> = raw
        .teams
        .into_iter()
        .map(|t| (t.id, t.short_name))
        .collect();

    let total = raw.elements.len();
    let players: Vec<PlayerStatRecord> = raw
        .elements
        .into_iter()
        .filter(|e| e.minutes > 0)
        .map(|e| {
            let name = e.web_name.trim().to_string();
            let team = teams
                .get(&e.team)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_TEAM.to_string());
            PlayerStatRecord {
                id: e.id,
                expected_goals: decimal(e.expected_goals, &name, "expected_goals"),
                expected_assists: decimal(e.expected_assists, &name, "expected_assists"),
                expected_goals_conceded: decimal(
                    e.expected_goals_conceded,
                    &name,
                    "expected_goals_conceded",
                ),
                name,
                team,
                element_type: e.element_type,
                minutes: e.minutes,
                starts: e.starts,
                bps: e.bps,
                clean_sheets: e.clean_sheets,
                bonus: e.bonus,
                total_points: e.total_points,
            }
        })
        .collect();

    info!(
        "parsed {} players with minutes out of {} elements",
        players.len(),
        total
    );
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
