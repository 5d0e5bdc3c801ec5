// Player season statistics as delivered by the data provider.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Playing position, derived from the FPL `element_type` class (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Map a numeric position class to a position. Classes outside 1-4
    /// return `None`.
    pub fn from_element_type(element_type: u8) -> Option<Position> {
        match element_type {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }

    /// Three-letter code used by the game (GKP, DEF, MID, FWD).
    pub fn short_name(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerStatRecord
// ---------------------------------------------------------------------------

/// Season-to-date statistics for one player.
///
/// The underlying expected statistics are optional: the provider leaves them
/// `None` when the source omits them, and the expected-score engine refuses
/// to score such a record instead of treating the gap as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub id: u32,
    pub name: String,
    /// Team short code (e.g. "ARS").
    pub team: String,
    /// Numeric position class: 1 GKP, 2 DEF, 3 MID, 4 FWD.
    pub element_type: u8,
    pub minutes: u32,
    pub starts: u32,
    pub expected_goals: Option<f64>,
    pub expected_assists: Option<f64>,
    pub expected_goals_conceded: Option<f64>,
    pub bps: Option<i32>,
    pub clean_sheets: u32,
    /// Bonus actually awarded. Carried for display only.
    pub bonus: u32,
    pub total_points: i32,
}

impl PlayerStatRecord {
    pub fn position(&self) -> Option<Position> {
        Position::from_element_type(self.element_type)
    }

    /// Position code for display, `"Unknown"` for unrecognised classes.
    pub fn position_name(&self) -> &'static str {
        self.position().map_or("Unknown", Position::short_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
