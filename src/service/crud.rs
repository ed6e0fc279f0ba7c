//! Typed create/list access for the cricket tables. Every statement is
//! parameterized; the display-SQL strings elsewhere never reach here.

use crate::error::AppError;
use crate::schema::{
    Award, Match, Performance, PerformanceSummary, Player, Team,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub team_name: String,
    pub coach: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub player_name: String,
    pub dob: Option<NaiveDate>,
    pub role: Option<String>,
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMatch {
    pub match_date: NaiveDate,
    pub venue: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPerformance {
    pub player_id: i64,
    pub match_id: i64,
    pub runs: Option<i32>,
    pub wickets: Option<i32>,
    pub catches: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAward {
    pub player_id: i64,
    pub match_id: i64,
    pub award_name: String,
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub async fn create_team(pool: &PgPool, new: &NewTeam) -> Result<Team, AppError> {
    require(&new.team_name, "team_name")?;
    tracing::debug!(table = "teams", "insert");
    let team = sqlx::query_as::<_, Team>(
        "INSERT INTO teams (team_name, coach, country) VALUES ($1, $2, $3) \
         RETURNING team_id, team_name, coach, country, created_at",
    )
    .bind(&new.team_name)
    .bind(&new.coach)
    .bind(&new.country)
    .fetch_one(pool)
    .await?;
    Ok(team)
}

pub async fn list_teams(pool: &PgPool) -> Result<Vec<Team>, AppError> {
    let teams = sqlx::query_as::<_, Team>(
        "SELECT team_id, team_name, coach, country, created_at FROM teams ORDER BY team_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(teams)
}

pub async fn create_player(pool: &PgPool, new: &NewPlayer) -> Result<Player, AppError> {
    require(&new.player_name, "player_name")?;
    tracing::debug!(table = "players", "insert");
    let player = sqlx::query_as::<_, Player>(
        "INSERT INTO players (player_name, dob, role, team_id) VALUES ($1, $2, $3, $4) \
         RETURNING player_id, player_name, dob, role, team_id, created_at",
    )
    .bind(&new.player_name)
    .bind(new.dob)
    .bind(&new.role)
    .bind(new.team_id)
    .fetch_one(pool)
    .await?;
    Ok(player)
}

pub async fn list_players(pool: &PgPool) -> Result<Vec<Player>, AppError> {
    let players = sqlx::query_as::<_, Player>(
        "SELECT player_id, player_name, dob, role, team_id, created_at FROM players \
         ORDER BY player_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(players)
}

pub async fn create_match(pool: &PgPool, new: &NewMatch) -> Result<Match, AppError> {
    tracing::debug!(table = "matches", "insert");
    let m = sqlx::query_as::<_, Match>(
        "INSERT INTO matches (match_date, venue) VALUES ($1, $2) \
         RETURNING match_id, match_date, venue, created_at",
    )
    .bind(new.match_date)
    .bind(&new.venue)
    .fetch_one(pool)
    .await?;
    Ok(m)
}

/// Newest matches first, matching the match-picker ordering.
pub async fn list_matches(pool: &PgPool) -> Result<Vec<Match>, AppError> {
    let matches = sqlx::query_as::<_, Match>(
        "SELECT match_id, match_date, venue, created_at FROM matches \
         ORDER BY match_date DESC, match_id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(matches)
}

pub async fn create_performance(
    pool: &PgPool,
    new: &NewPerformance,
) -> Result<Performance, AppError> {
    tracing::debug!(table = "performance", "insert");
    let perf = sqlx::query_as::<_, Performance>(
        "INSERT INTO performance (player_id, match_id, runs, wickets, catches) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING performance_id, player_id, match_id, runs, wickets, catches",
    )
    .bind(new.player_id)
    .bind(new.match_id)
    .bind(new.runs)
    .bind(new.wickets)
    .bind(new.catches)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(
            "performance already recorded for this player and match".into(),
        ),
        _ => AppError::Db(e),
    })?;
    Ok(perf)
}

pub async fn list_performances(pool: &PgPool) -> Result<Vec<Performance>, AppError> {
    let perfs = sqlx::query_as::<_, Performance>(
        "SELECT performance_id, player_id, match_id, runs, wickets, catches FROM performance \
         ORDER BY performance_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(perfs)
}

pub async fn create_award(pool: &PgPool, new: &NewAward) -> Result<Award, AppError> {
    require(&new.award_name, "award_name")?;
    tracing::debug!(table = "awards", "insert");
    let award = sqlx::query_as::<_, Award>(
        "INSERT INTO awards (award_name, player_id, match_id) VALUES ($1, $2, $3) \
         RETURNING award_id, award_name, player_id, match_id, created_at",
    )
    .bind(&new.award_name)
    .bind(new.player_id)
    .bind(new.match_id)
    .fetch_one(pool)
    .await?;
    Ok(award)
}

pub async fn list_awards(pool: &PgPool) -> Result<Vec<Award>, AppError> {
    let awards = sqlx::query_as::<_, Award>(
        "SELECT award_id, award_name, player_id, match_id, created_at FROM awards \
         ORDER BY award_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(awards)
}

/// Exact, unfiltered row count. `table` must be one of the fixed names in
/// `schema::table`; it is never user input.
pub async fn exact_count(pool: &PgPool, table: &str) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Rows from the `match_performance_summary` view.
pub async fn performance_summary(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<PerformanceSummary>, AppError> {
    let sql = match limit {
        Some(_) => {
            "SELECT player_name, match_date, venue, runs, wickets, catches \
             FROM match_performance_summary LIMIT $1"
        }
        None => {
            "SELECT player_name, match_date, venue, runs, wickets, catches \
             FROM match_performance_summary"
        }
    };
    let mut q = sqlx::query_as::<_, PerformanceSummary>(sql);
    if let Some(n) = limit {
        q = q.bind(n);
    }
    let rows = q.fetch_all(pool).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_fields_are_rejected() {
        assert!(require("", "team_name").is_err());
        assert!(require("   ", "team_name").is_err());
        assert!(require("India", "team_name").is_ok());
    }
}
