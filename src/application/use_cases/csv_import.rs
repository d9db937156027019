use crate::domain::error::{AppError, Result};
use crate::domain::team_season::{ImportReport, TeamSeasonRecord};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::db::team_seasons::TeamSeasonRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Loads the configured season export into the record store.
pub struct CsvImportUseCase {
    repository: Arc<TeamSeasonRepository>,
    csv_path: PathBuf,
}

impl CsvImportUseCase {
    pub fn new(repository: Arc<TeamSeasonRepository>, csv_path: PathBuf) -> Self {
        Self {
            repository,
            csv_path,
        }
    }

    /// Parses the whole file, then inserts every valid row in one batch.
    /// Rows that could not be mapped are reported, not inserted. Running it
    /// twice stores every row twice.
    pub async fn execute(&self) -> Result<ImportReport> {
        let path = self.csv_path.clone();
        let parsed = tokio::task::spawn_blocking(move || CsvParser::new().parse_file(&path))
            .await
            .map_err(|e| AppError::Internal(format!("CSV parse task failed: {}", e)))??;

        for failure in &parsed.failures {
            warn!(line = failure.line, reason = %failure.message, "Skipping CSV row");
        }

        let records: Vec<TeamSeasonRecord> =
            parsed.rows.into_iter().map(TeamSeasonRecord::new).collect();
        let inserted = if records.is_empty() {
            0
        } else {
            self.repository.insert_many(&records).await?
        };

        info!(
            path = %self.csv_path.display(),
            inserted,
            failed = parsed.failures.len(),
            "CSV import finished"
        );

        Ok(ImportReport {
            inserted,
            failed: parsed.failures,
        })
    }
}
