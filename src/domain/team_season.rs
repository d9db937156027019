use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field set supplied by clients when adding or overwriting a record. Only
/// presence is checked; values are stored as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonInput {
    pub team: String,
    pub games_played: i64,
    pub win: i64,
    pub draw: i64,
    pub loss: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub points: i64,
    pub year: i64,
}

/// One team's statistics for one season, as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub team: String,
    pub games_played: i64,
    pub win: i64,
    pub draw: i64,
    pub loss: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub points: i64,
    pub year: i64,
}

impl TeamSeasonRecord {
    /// Builds a record with a freshly generated identity.
    pub fn new(input: TeamSeasonInput) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input)
    }

    pub fn with_id(id: String, input: TeamSeasonInput) -> Self {
        Self {
            id,
            team: input.team,
            games_played: input.games_played,
            win: input.win,
            draw: input.draw,
            loss: input.loss,
            goals_for: input.goals_for,
            goals_against: input.goals_against,
            points: input.points,
            year: input.year,
        }
    }
}

/// Reduced projection returned by the team + year stats lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub team: String,
    pub games_played: i64,
    pub win: i64,
    pub draw: i64,
}

impl From<TeamSeasonRecord> for TeamStats {
    fn from(record: TeamSeasonRecord) -> Self {
        Self {
            team: record.team,
            games_played: record.games_played,
            win: record.win,
            draw: record.draw,
        }
    }
}

/// Records of a single year together with their mean goals scored.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub records: Vec<TeamSeasonRecord>,
    pub average_goals_for: f64,
}

/// Rounds a store-side average to two decimals; an empty set averages to 0.
pub fn round_average(average: Option<f64>) -> f64 {
    match average {
        Some(value) if value.is_finite() => (value * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-based line number in the source file, header included.
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub failed: Vec<RowFailure>,
}
