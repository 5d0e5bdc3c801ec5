// CSV export of the scored player table.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use crate::engine::ExpectedScoreRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One output row. Column names follow the analyzer's table headings.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: u32,
    name: &'a str,
    team: &'a str,
    position: &'static str,
    minutes: u32,
    starts: u32,
    matches_played: f64,
    total_points: i32,
    #[serde(rename = "xG_points")]
    xg_points: f64,
    #[serde(rename = "xA_points")]
    xa_points: f64,
    #[serde(rename = "xCS_points")]
    xcs_points: f64,
    #[serde(rename = "xBonus_points")]
    xbonus_points: f64,
    #[serde(rename = "xAppearance_points")]
    xappearance_points: f64,
    #[serde(rename = "xFPL")]
    xfpl: f64,
    #[serde(rename = "xG90")]
    xg90: f64,
    #[serde(rename = "xA90")]
    xa90: f64,
    #[serde(rename = "xFPL90")]
    xfpl90: f64,
    #[serde(rename = "xGI")]
    xgi: f64,
    #[serde(rename = "xGI90")]
    xgi90: f64,
    delta: f64,
    performance_pct: f64,
}

impl<'a> From<&'a ExpectedScoreRecord> for ExportRow<'a> {
    fn from(r: &'a ExpectedScoreRecord) -> Self {
        ExportRow {
            id: r.player.id,
            name: &r.player.name,
            team: &r.player.team,
            position: r.player.position_name(),
            minutes: r.player.minutes,
            starts: r.player.starts,
            matches_played: r.matches_played,
            total_points: r.player.total_points,
            xg_points: r.xg_points,
            xa_points: r.xa_points,
            xcs_points: r.xcs_points,
            xbonus_points: r.xbonus_points,
            xappearance_points: r.xappearance_points,
            xfpl: r.xfpl,
            xg90: r.xg90,
            xa90: r.xa90,
            xfpl90: r.xfpl90,
            xgi: r.xgi,
            xgi90: r.xgi90,
            delta: r.delta,
            performance_pct: r.performance_pct,
        }
    }
}

/// Write `records` as CSV with a header row. Returns the number of data rows.
pub fn write_csv<W: Write>(records: &[ExpectedScoreRecord], writer: W) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(ExportRow::from(record))?;
    }
    wtr.flush()?;
    debug!(rows = records.len(), "csv rows written");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_expected_score;
    use xfpl_core::config::ScoringConfig;
    use xfpl_core::player::PlayerStatRecord;

    fn sample() -> ExpectedScoreRecord {
        let record = PlayerStatRecord {
            id: 7,
            name: "Saka".into(),
            team: "ARS".into(),
            element_type: 3,
            minutes: 900,
            starts: 10,
            expected_goals: Some(3.0),
            expected_assists: Some(2.5),
            expected_goals_conceded: Some(9.0),
            bps: Some(280),
            clean_sheets: 3,
            bonus: 6,
            total_points: 70,
        };
        compute_expected_score(&record, &ScoringConfig::default())
            .unwrap()
            .rounded()
    }

    #[test]
    fn header_and_row_written() {
        let mut buf = Vec::new();
        let rows = write_csv(&[sample()], &mut buf).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("id,name,team,position,minutes"));
        assert!(header.contains("xFPL,xG90,xA90,xFPL90,xGI,xGI90,delta,performance_pct"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("7,Saka,ARS,MID,900,10,10.0,70,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let mut record = sample();
        record.player.name = "Smith, J".into();
        let mut buf = Vec::new();
        write_csv(&[record], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Smith, J\""));
    }

    #[test]
    fn empty_table_writes_nothing() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&[], &mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }
}
