use std::sync::Arc;

use sqlx::sqlite::SqlitePool;
use tracing::error;

use crate::application::{CsvImportUseCase, TeamSeasonUseCase};
use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::db::connection;
use crate::infrastructure::db::team_seasons::TeamSeasonRepository;
use crate::interfaces::http::HttpState;

/// Everything the HTTP layer needs, plus the pool so the caller can close it.
pub struct Bootstrapped {
    pub pool: SqlitePool,
    pub state: HttpState,
}

pub async fn bootstrap(config: &AppConfig) -> Result<Bootstrapped> {
    let pool = connection::connect(&config.database_url, config.max_connections)
        .await
        .map_err(|err| {
            error!(error = %err, database_url = %config.database_url, "Failed to open record store");
            err
        })?;

    let repository = Arc::new(TeamSeasonRepository::new(pool.clone()));
    let state = HttpState {
        team_seasons: Arc::new(TeamSeasonUseCase::new(repository.clone())),
        importer: Arc::new(CsvImportUseCase::new(
            repository,
            config.csv_path.clone(),
        )),
    };

    Ok(Bootstrapped { pool, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Serialized, Toml};
    use figment::Figment;

    #[tokio::test]
    async fn test_bootstrap_wires_store_into_use_cases() {
        let config = AppConfig::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::string(r#"database_url = "sqlite::memory:""#)),
        )
        .unwrap();

        let booted = bootstrap(&config).await.unwrap();
        let summary = booted.state.team_seasons.list_by_year(2023).await.unwrap();
        assert!(summary.records.is_empty());

        connection::close(&booted.pool).await;
    }
}
