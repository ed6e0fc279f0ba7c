//! Row types for the eight tables and one view. Shapes match the DDL in
//! `store.rs`; every entity carries an integer surrogate key.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub mod table {
    pub const TEAMS: &str = "teams";
    pub const PLAYERS: &str = "players";
    pub const MATCHES: &str = "matches";
    pub const PERFORMANCE: &str = "performance";
    pub const AWARDS: &str = "awards";
    pub const MATCH_SCORES: &str = "match_scores";
    pub const MATCH_RESULT: &str = "match_result";
    pub const SQL_LOGS: &str = "sql_logs";
    pub const MATCH_PERFORMANCE_SUMMARY: &str = "match_performance_summary";
}

/// Player roles offered by the player form. Stored as free text.
pub const PLAYER_ROLES: &[&str] = &["Batsman", "Bowler", "All-rounder", "Wicket-keeper"];

/// Award-name suggestions offered by the award form. The column itself is
/// free text; this list is advisory only.
pub const AWARD_NAMES: &[&str] = &[
    "Player of the Match",
    "Best Bowler",
    "Best Batsman",
    "Best Fielder",
    "Man of the Series",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub coach: Option<String>,
    pub country: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub player_id: i64,
    pub player_name: String,
    pub dob: Option<NaiveDate>,
    pub role: Option<String>,
    pub team_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub match_id: i64,
    pub match_date: NaiveDate,
    pub venue: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Performance {
    pub performance_id: i64,
    pub player_id: Option<i64>,
    pub match_id: Option<i64>,
    pub runs: Option<i32>,
    pub wickets: Option<i32>,
    pub catches: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Award {
    pub award_id: i64,
    pub award_name: String,
    pub player_id: Option<i64>,
    pub match_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchScore {
    pub score_id: i64,
    pub match_id: Option<i64>,
    pub team_id: Option<i64>,
    pub score: i32,
}

/// Derived by the database trigger once both team scores for a match exist;
/// never written by application code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchResult {
    pub result_id: i64,
    pub match_id: Option<i64>,
    pub winner_team_id: Option<i64>,
    pub margin: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SqlLog {
    pub log_id: i64,
    pub sql_text: String,
    pub operation_type: Option<String>,
    pub executed_at: Option<DateTime<Utc>>,
}

/// One row of the `match_performance_summary` view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PerformanceSummary {
    pub player_name: Option<String>,
    pub match_date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub runs: Option<i32>,
    pub wickets: Option<i32>,
    pub catches: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_serialize_with_column_names() {
        let score = MatchScore {
            score_id: 1,
            match_id: Some(3),
            team_id: Some(2),
            score: 250,
        };
        let v = serde_json::to_value(&score).unwrap();
        assert_eq!(v["score_id"], 1);
        assert_eq!(v["score"], 250);

        let result = MatchResult {
            result_id: 9,
            match_id: Some(3),
            winner_team_id: Some(2),
            margin: Some(5),
        };
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["winner_team_id"], 2);
        assert_eq!(v["margin"], 5);
    }

    #[test]
    fn suggestion_lists_are_the_fixed_sets() {
        assert_eq!(PLAYER_ROLES.len(), 4);
        assert!(AWARD_NAMES.contains(&"Player of the Match"));
    }
}
