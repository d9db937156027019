use crate::domain::error::{AppError, Result};
use crate::domain::team_season::{
    round_average, TeamSeasonInput, TeamSeasonRecord, TeamStats, YearSummary,
};
use crate::infrastructure::db::team_seasons::TeamSeasonRepository;
use std::sync::Arc;
use tracing::{debug, warn};

/// Upper bound on records returned by the win threshold query.
pub const WIN_THRESHOLD_LIMIT: i64 = 10;

pub struct TeamSeasonUseCase {
    repository: Arc<TeamSeasonRepository>,
}

impl TeamSeasonUseCase {
    pub fn new(repository: Arc<TeamSeasonRepository>) -> Self {
        Self { repository }
    }

    pub async fn add(&self, input: TeamSeasonInput) -> Result<TeamSeasonRecord> {
        let record = TeamSeasonRecord::new(input);
        self.repository.insert(&record).await?;
        debug!(id = %record.id, team = %record.team, year = record.year, "Team season added");
        Ok(record)
    }

    pub async fn list_by_year(&self, year: i64) -> Result<YearSummary> {
        let records = self.repository.find_by_year(year).await?;
        let average = self.repository.average_goals_for(year).await?;
        Ok(YearSummary {
            records,
            average_goals_for: round_average(average),
        })
    }

    pub async fn find_by_team(&self, team: &str) -> Result<Vec<TeamSeasonRecord>> {
        let records = self.repository.find_by_team(team).await?;
        if records.is_empty() {
            return Err(AppError::NotFound(format!("No seasons for team {}", team)));
        }
        Ok(records)
    }

    /// Overwrites the record. An unknown id is not an error.
    pub async fn update(&self, id: &str, input: TeamSeasonInput) -> Result<()> {
        let affected = self.repository.update(id, &input).await?;
        if affected == 0 {
            warn!(id = %id, "Update matched no team season");
        }
        Ok(())
    }

    /// Removes the record. An unknown id is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let affected = self.repository.delete(id).await?;
        if affected == 0 {
            warn!(id = %id, "Delete matched no team season");
        }
        Ok(())
    }

    pub async fn stats(&self, team: &str, year: i64) -> Result<TeamStats> {
        self.repository
            .find_by_team_and_year(team, year)
            .await?
            .into_iter()
            .next()
            .map(TeamStats::from)
            .ok_or_else(|| AppError::NotFound(format!("No season for {} in {}", team, year)))
    }

    /// First matches with at least `threshold` wins; may be empty.
    pub async fn with_min_wins(&self, threshold: f64) -> Result<Vec<TeamSeasonRecord>> {
        self.repository
            .find_by_min_wins(threshold, WIN_THRESHOLD_LIMIT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::connection;

    async fn use_case() -> TeamSeasonUseCase {
        let pool = connection::connect("sqlite::memory:", 1).await.unwrap();
        TeamSeasonUseCase::new(Arc::new(TeamSeasonRepository::new(pool)))
    }

    fn input(team: &str, year: i64, goals_for: i64) -> TeamSeasonInput {
        TeamSeasonInput {
            team: team.to_string(),
            games_played: 10,
            win: 5,
            draw: 2,
            loss: 3,
            goals_for,
            goals_against: 10,
            points: 17,
            year,
        }
    }

    #[tokio::test]
    async fn test_add_then_find_by_team() {
        let uc = use_case().await;
        let added = uc.add(input("Alpha", 2023, 15)).await.unwrap();

        let found = uc.find_by_team("Alpha").await.unwrap();
        assert!(found.contains(&added));
    }

    #[tokio::test]
    async fn test_add_stores_empty_team() {
        let uc = use_case().await;
        let added = uc.add(input("", 2023, 15)).await.unwrap();

        let found = uc.find_by_team("").await.unwrap();
        assert_eq!(found, vec![added]);

        let mut renamed = input("", 2023, 15);
        renamed.win = 7;
        uc.update(&found[0].id, renamed).await.unwrap();
        assert_eq!(uc.stats("", 2023).await.unwrap().win, 7);
    }

    #[tokio::test]
    async fn test_find_by_unknown_team_is_not_found() {
        let uc = use_case().await;
        let err = uc.find_by_team("Nobody").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_year_averages_to_zero() {
        let uc = use_case().await;
        let summary = uc.list_by_year(1999).await.unwrap();
        assert!(summary.records.is_empty());
        assert_eq!(summary.average_goals_for, 0.0);
    }

    #[tokio::test]
    async fn test_year_average_rounds_to_two_decimals() {
        let uc = use_case().await;
        for goals in [10, 11, 11] {
            uc.add(input("Alpha", 2023, goals)).await.unwrap();
        }
        uc.add(input("Beta", 2024, 50)).await.unwrap();

        let summary = uc.list_by_year(2023).await.unwrap();
        assert_eq!(summary.records.len(), 3);
        assert_eq!(summary.average_goals_for, 10.67);
    }

    #[tokio::test]
    async fn test_update_is_visible_through_stats() {
        let uc = use_case().await;
        let added = uc.add(input("Alpha", 2023, 15)).await.unwrap();

        let mut changed = input("Alpha", 2023, 15);
        changed.games_played = 12;
        changed.win = 9;
        changed.draw = 1;
        uc.update(&added.id, changed).await.unwrap();

        let stats = uc.stats("Alpha", 2023).await.unwrap();
        assert_eq!(
            stats,
            TeamStats {
                team: "Alpha".to_string(),
                games_played: 12,
                win: 9,
                draw: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_succeed() {
        let uc = use_case().await;
        uc.update("no-such-id", input("Alpha", 2023, 1)).await.unwrap();
        uc.delete("no-such-id").await.unwrap();
    }

    #[tokio::test]
    async fn test_stats_for_missing_pair_is_not_found() {
        let uc = use_case().await;
        uc.add(input("Alpha", 2023, 15)).await.unwrap();
        assert!(matches!(
            uc.stats("Alpha", 2022).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_min_wins_is_capped() {
        let uc = use_case().await;
        for i in 0..12 {
            uc.add(input(&format!("Team {i}"), 2023, 10)).await.unwrap();
        }
        let result = uc.with_min_wins(5.0).await.unwrap();
        assert_eq!(result.len(), WIN_THRESHOLD_LIMIT as usize);
        assert!(uc.with_min_wins(5.5).await.unwrap().is_empty());
    }
}
