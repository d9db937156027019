use crate::domain::error::{AppError, Result};
use crate::domain::team_season::{TeamSeasonInput, TeamSeasonRecord};
use sqlx::sqlite::SqlitePool;

const SELECT_COLUMNS: &str = "SELECT id, team, games_played, win, draw, loss, goals_for, goals_against, points, year
     FROM team_seasons";

const INSERT_SQL: &str = "INSERT INTO team_seasons (id, team, games_played, win, draw, loss, goals_for, goals_against, points, year)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Record store adapter for the `team_seasons` collection.
pub struct TeamSeasonRepository {
    pool: SqlitePool,
}

impl TeamSeasonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &TeamSeasonRecord) -> Result<()> {
        bind_record(sqlx::query(INSERT_SQL), record)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert team season: {e}")))?;

        Ok(())
    }

    /// Inserts all records in one transaction; either every row lands or none do.
    pub async fn insert_many(&self, records: &[TeamSeasonRecord]) -> Result<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to begin import: {e}")))?;

        for record in records {
            bind_record(sqlx::query(INSERT_SQL), record)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to import team {}: {e}", record.team))
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to commit import: {e}")))?;

        Ok(records.len())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<TeamSeasonRecord>> {
        let entity = sqlx::query_as::<_, TeamSeasonEntity>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to fetch team season: {e}")))?;

        Ok(entity.map(|e| e.into()))
    }

    pub async fn find_by_year(&self, year: i64) -> Result<Vec<TeamSeasonRecord>> {
        sqlx::query_as::<_, TeamSeasonEntity>(&format!(
            "{SELECT_COLUMNS} WHERE year = ? ORDER BY rowid"
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list seasons for year: {e}")))
        .map(|entities| entities.into_iter().map(|e| e.into()).collect())
    }

    pub async fn find_by_team(&self, team: &str) -> Result<Vec<TeamSeasonRecord>> {
        sqlx::query_as::<_, TeamSeasonEntity>(&format!(
            "{SELECT_COLUMNS} WHERE team = ? ORDER BY rowid"
        ))
        .bind(team)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list seasons for team: {e}")))
        .map(|entities| entities.into_iter().map(|e| e.into()).collect())
    }

    pub async fn find_by_team_and_year(
        &self,
        team: &str,
        year: i64,
    ) -> Result<Vec<TeamSeasonRecord>> {
        sqlx::query_as::<_, TeamSeasonEntity>(&format!(
            "{SELECT_COLUMNS} WHERE team = ? AND year = ? ORDER BY rowid"
        ))
        .bind(team)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch team stats: {e}")))
        .map(|entities| entities.into_iter().map(|e| e.into()).collect())
    }

    /// Mean `goals_for` over a year; `None` when the year has no records.
    pub async fn average_goals_for(&self, year: i64) -> Result<Option<f64>> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(goals_for) FROM team_seasons WHERE year = ?",
        )
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to average goals: {e}")))
    }

    pub async fn find_by_min_wins(
        &self,
        threshold: f64,
        limit: i64,
    ) -> Result<Vec<TeamSeasonRecord>> {
        sqlx::query_as::<_, TeamSeasonEntity>(&format!(
            "{SELECT_COLUMNS} WHERE win >= ? ORDER BY rowid LIMIT ?"
        ))
        .bind(threshold)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to query by wins: {e}")))
        .map(|entities| entities.into_iter().map(|e| e.into()).collect())
    }

    /// Overwrites every field of the record; returns the number of rows touched.
    pub async fn update(&self, id: &str, input: &TeamSeasonInput) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE team_seasons
             SET team = ?, games_played = ?, win = ?, draw = ?, loss = ?,
                 goals_for = ?, goals_against = ?, points = ?, year = ?
             WHERE id = ?",
        )
        .bind(&input.team)
        .bind(input.games_played)
        .bind(input.win)
        .bind(input.draw)
        .bind(input.loss)
        .bind(input.goals_for)
        .bind(input.goals_against)
        .bind(input.points)
        .bind(input.year)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update team season: {e}")))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM team_seasons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete team season: {e}")))?;

        Ok(result.rows_affected())
    }
}

fn bind_record<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    record: &'q TeamSeasonRecord,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(&record.id)
        .bind(&record.team)
        .bind(record.games_played)
        .bind(record.win)
        .bind(record.draw)
        .bind(record.loss)
        .bind(record.goals_for)
        .bind(record.goals_against)
        .bind(record.points)
        .bind(record.year)
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct TeamSeasonEntity {
    id: String,
    team: String,
    games_played: i64,
    win: i64,
    draw: i64,
    loss: i64,
    goals_for: i64,
    goals_against: i64,
    points: i64,
    year: i64,
}

impl From<TeamSeasonEntity> for TeamSeasonRecord {
    fn from(e: TeamSeasonEntity) -> Self {
        Self {
            id: e.id,
            team: e.team,
            games_played: e.games_played,
            win: e.win,
            draw: e.draw,
            loss: e.loss,
            goals_for: e.goals_for,
            goals_against: e.goals_against,
            points: e.points,
            year: e.year,
        }
    }
}
