// ============================================================
// TEAM SEASON CSV PARSER
// ============================================================
// Maps the fixed season export layout onto record inputs

use crate::domain::error::AppError;
use crate::domain::team_season::{RowFailure, TeamSeasonInput};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::path::Path;

/// Header names of the season export, in file order.
pub const EXPECTED_HEADERS: [&str; 9] = [
    "Team",
    "Games Played",
    "Win",
    "Draw",
    "Loss",
    "Goals For",
    "Goals Against",
    "Points",
    "Year",
];

/// One row as it appears in the export
#[derive(Debug, Deserialize)]
struct SeasonRow {
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Games Played")]
    games_played: i64,
    #[serde(rename = "Win")]
    win: i64,
    #[serde(rename = "Draw")]
    draw: i64,
    #[serde(rename = "Loss")]
    loss: i64,
    #[serde(rename = "Goals For")]
    goals_for: i64,
    #[serde(rename = "Goals Against")]
    goals_against: i64,
    #[serde(rename = "Points")]
    points: i64,
    #[serde(rename = "Year")]
    year: i64,
}

impl From<SeasonRow> for TeamSeasonInput {
    fn from(row: SeasonRow) -> Self {
        Self {
            team: row.team,
            games_played: row.games_played,
            win: row.win,
            draw: row.draw,
            loss: row.loss,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            points: row.points,
            year: row.year,
        }
    }
}

/// Outcome of parsing a whole file: mapped rows plus the ones that did not map.
#[derive(Debug, Default)]
pub struct ParsedSeasons {
    pub rows: Vec<TeamSeasonInput>,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse a season export from disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedSeasons, AppError> {
        let buffer = std::fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        // Exports saved by spreadsheet tools are not always valid UTF-8
        let content = String::from_utf8_lossy(&buffer);
        self.parse_content(&content)
    }

    /// Parse CSV content from string. Header problems fail the whole parse,
    /// row problems are collected.
    pub fn parse_content(&self, content: &str) -> Result<ParsedSeasons, AppError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        check_headers(&headers)?;

        let mut parsed = ParsedSeasons::default();
        let mut record = StringRecord::new();
        loop {
            let line = reader.position().line();
            match reader.read_record(&mut record) {
                Ok(false) => break,
                Ok(true) => {
                    let line = record.position().map(|p| p.line()).unwrap_or(line);
                    match map_row(&record, &headers) {
                        Ok(input) => parsed.rows.push(input),
                        Err(message) => parsed.failures.push(RowFailure { line, message }),
                    }
                }
                Err(e) => parsed.failures.push(RowFailure {
                    line: e.position().map(|p| p.line()).unwrap_or(line),
                    message: e.to_string(),
                }),
            }
        }

        Ok(parsed)
    }
}

fn map_row(record: &StringRecord, headers: &StringRecord) -> Result<TeamSeasonInput, String> {
    record
        .deserialize::<SeasonRow>(Some(headers))
        .map(TeamSeasonInput::from)
        .map_err(|e| e.to_string())
}

fn check_headers(headers: &StringRecord) -> Result<(), AppError> {
    let missing: Vec<&str> = EXPECTED_HEADERS
        .iter()
        .copied()
        .filter(|expected| !headers.iter().any(|h| h == *expected))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::ParseError(format!(
            "CSV is missing required columns: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Team,Games Played,Win,Draw,Loss,Goals For,Goals Against,Points,Year";

    #[test]
    fn test_parse_single_row() {
        let content = format!("{HEADER}\nAlpha,10,5,2,3,15,10,17,2023\n");
        let parsed = CsvParser::new().parse_content(&content).unwrap();

        assert!(parsed.failures.is_empty());
        assert_eq!(
            parsed.rows,
            vec![TeamSeasonInput {
                team: "Alpha".to_string(),
                games_played: 10,
                win: 5,
                draw: 2,
                loss: 3,
                goals_for: 15,
                goals_against: 10,
                points: 17,
                year: 2023,
            }]
        );
    }

    #[test]
    fn test_whitespace_and_bom_are_ignored() {
        let content = "\u{feff}Team, Games Played, Win, Draw, Loss, Goals For, Goals Against, Points, Year\n Alpha , 10, 5, 2, 3, 15, 10, 17, 2023";
        let parsed = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].team, "Alpha");
    }

    #[test]
    fn test_bad_rows_are_collected_with_line_numbers() {
        let content = format!(
            "{HEADER}\nAlpha,10,5,2,3,15,10,17,2023\nBeta,ten,5,2,3,15,10,17,2023\nGamma,10,5\nDelta,8,4,2,2,11,9,14,2022\n,9,1,1,7,4,12,4,2022\n"
        );
        let parsed = CsvParser::new().parse_content(&content).unwrap();

        let teams: Vec<&str> = parsed.rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(teams, vec!["Alpha", "Delta", ""]);

        let lines: Vec<u64> = parsed.failures.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn test_missing_column_fails_whole_parse() {
        let content = "Team,Win,Year\nAlpha,5,2023\n";
        let err = CsvParser::new().parse_content(content).unwrap_err();
        match err {
            AppError::ParseError(msg) => {
                assert!(msg.contains("Games Played"));
                assert!(msg.contains("Goals For"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CsvParser::new()
            .parse_file(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
