//! Canned read queries. Dispatch is by enumerated identifier; the SQL text
//! attached to each query is display material, not an executed statement.
//! Free-text input is resolved to an identifier by the documented substring
//! priority, kept for compatibility with the freehand query box.

use crate::error::AppError;
use crate::schema::PerformanceSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CannedQuery {
    TopRunScorers,
    MatchSummary,
    PlayersWithAwards,
    MatchResults,
    /// Raw read of the `match_performance_summary` view. Reachable through
    /// free text only; not part of the predefined statement list.
    PerformanceSummary,
}

impl CannedQuery {
    /// The four statements offered as predefined cards.
    pub const PREDEFINED: [CannedQuery; 4] = [
        CannedQuery::TopRunScorers,
        CannedQuery::MatchSummary,
        CannedQuery::PlayersWithAwards,
        CannedQuery::MatchResults,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CannedQuery::TopRunScorers => "Top 5 Run Scorers",
            CannedQuery::MatchSummary => "Match Summary",
            CannedQuery::PlayersWithAwards => "Players with Awards",
            CannedQuery::MatchResults => "Match Results",
            CannedQuery::PerformanceSummary => "Match Performance Summary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CannedQuery::TopRunScorers => {
                "Aggregate query showing top run-scorers across all matches"
            }
            CannedQuery::MatchSummary => "Join query showing scores for each match",
            CannedQuery::PlayersWithAwards => "Join query showing all players who received awards",
            CannedQuery::MatchResults => "View showing winners and margins for completed matches",
            CannedQuery::PerformanceSummary => "Per-player performance rows from the summary view",
        }
    }

    /// The SQL-equivalent statement shown in the display panel.
    pub fn sql(&self) -> &'static str {
        match self {
            CannedQuery::TopRunScorers => {
                "SELECT p.player_name, SUM(per.runs) AS total_runs\n\
                 FROM performance per\n\
                 JOIN players p ON per.player_id = p.player_id\n\
                 GROUP BY p.player_name\n\
                 ORDER BY total_runs DESC\n\
                 LIMIT 5;"
            }
            CannedQuery::MatchSummary => {
                "SELECT m.match_id, m.match_date, t.team_name, ms.score, m.venue\n\
                 FROM matches m\n\
                 JOIN match_scores ms ON m.match_id = ms.match_id\n\
                 JOIN teams t ON ms.team_id = t.team_id\n\
                 ORDER BY m.match_date DESC;"
            }
            CannedQuery::PlayersWithAwards => {
                "SELECT p.player_name, a.award_name, m.match_date, m.venue\n\
                 FROM players p\n\
                 JOIN awards a ON p.player_id = a.player_id\n\
                 JOIN matches m ON a.match_id = m.match_id\n\
                 ORDER BY m.match_date DESC;"
            }
            CannedQuery::MatchResults => {
                "SELECT m.match_date, m.venue, t.team_name as winner, mr.margin\n\
                 FROM match_result mr\n\
                 JOIN matches m ON mr.match_id = m.match_id\n\
                 JOIN teams t ON mr.winner_team_id = t.team_id\n\
                 ORDER BY m.match_date DESC;"
            }
            CannedQuery::PerformanceSummary => "SELECT * FROM match_performance_summary;",
        }
    }

    /// Map free text to a query identifier. Substring checks over the
    /// lowercased input, in fixed priority order; a matched word out of its
    /// intended context still selects that branch. Unmatched text yields
    /// None (empty result set downstream, never an error).
    pub fn resolve(text: &str) -> Option<CannedQuery> {
        let lower = text.to_lowercase();
        if lower.contains("match_performance_summary") {
            return Some(CannedQuery::PerformanceSummary);
        }
        if lower.contains("from performance") && lower.contains("sum") {
            return Some(CannedQuery::TopRunScorers);
        }
        if lower.contains("match_scores") {
            return Some(CannedQuery::MatchSummary);
        }
        if lower.contains("awards") {
            return Some(CannedQuery::PlayersWithAwards);
        }
        if lower.contains("match_result") {
            return Some(CannedQuery::MatchResults);
        }
        None
    }
}

/// Performance row joined to its player's name, pre-aggregation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScorerRow {
    pub player_name: Option<String>,
    pub runs: Option<i32>,
}

/// One team's score within one match, joined flat.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MatchScoreRow {
    pub match_id: i64,
    pub match_date: NaiveDate,
    pub venue: Option<String>,
    pub team_name: Option<String>,
    pub score: i32,
}

/// Award joined to player and match.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AwardRow {
    pub player_name: Option<String>,
    pub award_name: String,
    pub match_date: Option<NaiveDate>,
    pub venue: Option<String>,
}

/// Derived result joined to match and winning team.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResultRow {
    pub match_date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub winner: Option<String>,
    pub margin: Option<i32>,
}

/// Group performance rows by player name, sum runs, sort descending and keep
/// the top five. Missing names fold into "Unknown"; null runs count zero.
pub fn aggregate_top_scorers(rows: &[ScorerRow]) -> Vec<Value> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for row in rows {
        let name = row.player_name.clone().unwrap_or_else(|| "Unknown".into());
        if !totals.contains_key(&name) {
            order.push(name.clone());
        }
        *totals.entry(name).or_insert(0) += i64::from(row.runs.unwrap_or(0));
    }
    let mut scorers: Vec<(String, i64)> = order
        .into_iter()
        .map(|name| {
            let total = totals[&name];
            (name, total)
        })
        .collect();
    scorers.sort_by(|a, b| b.1.cmp(&a.1));
    scorers
        .into_iter()
        .take(5)
        .map(|(name, total)| json!({ "player_name": name, "total_runs": total }))
        .collect()
}

pub fn flatten_match_scores(rows: &[MatchScoreRow]) -> Vec<Value> {
    rows.iter()
        .map(|r| {
            json!({
                "match_id": r.match_id,
                "match_date": r.match_date,
                "venue": r.venue,
                "team_name": r.team_name,
                "score": r.score,
            })
        })
        .collect()
}

pub fn shape_award_rows(rows: &[AwardRow]) -> Vec<Value> {
    rows.iter()
        .map(|r| {
            json!({
                "player_name": r.player_name,
                "award_name": r.award_name,
                "match_date": r.match_date,
                "venue": r.venue,
            })
        })
        .collect()
}

pub fn shape_result_rows(rows: &[ResultRow]) -> Vec<Value> {
    rows.iter()
        .map(|r| {
            json!({
                "match_date": r.match_date,
                "venue": r.venue,
                "winner": r.winner,
                "margin": r.margin,
            })
        })
        .collect()
}

/// Execute the fixed read path for one query and reshape locally.
pub async fn run(pool: &PgPool, query: CannedQuery) -> Result<Vec<Value>, AppError> {
    match query {
        CannedQuery::TopRunScorers => {
            let rows = sqlx::query_as::<_, ScorerRow>(
                "SELECT p.player_name, per.runs FROM performance per \
                 LEFT JOIN players p ON per.player_id = p.player_id",
            )
            .fetch_all(pool)
            .await?;
            Ok(aggregate_top_scorers(&rows))
        }
        CannedQuery::MatchSummary => {
            let rows = sqlx::query_as::<_, MatchScoreRow>(
                "SELECT m.match_id, m.match_date, m.venue, t.team_name, ms.score \
                 FROM matches m \
                 JOIN match_scores ms ON m.match_id = ms.match_id \
                 LEFT JOIN teams t ON ms.team_id = t.team_id \
                 ORDER BY m.match_date DESC, ms.score_id",
            )
            .fetch_all(pool)
            .await?;
            Ok(flatten_match_scores(&rows))
        }
        CannedQuery::PlayersWithAwards => {
            let rows = sqlx::query_as::<_, AwardRow>(
                "SELECT p.player_name, a.award_name, m.match_date, m.venue \
                 FROM awards a \
                 LEFT JOIN players p ON a.player_id = p.player_id \
                 LEFT JOIN matches m ON a.match_id = m.match_id \
                 ORDER BY a.award_id DESC",
            )
            .fetch_all(pool)
            .await?;
            Ok(shape_award_rows(&rows))
        }
        CannedQuery::MatchResults => {
            let rows = sqlx::query_as::<_, ResultRow>(
                "SELECT m.match_date, m.venue, t.team_name AS winner, mr.margin \
                 FROM match_result mr \
                 LEFT JOIN matches m ON mr.match_id = m.match_id \
                 LEFT JOIN teams t ON mr.winner_team_id = t.team_id \
                 ORDER BY mr.result_id DESC",
            )
            .fetch_all(pool)
            .await?;
            Ok(shape_result_rows(&rows))
        }
        CannedQuery::PerformanceSummary => {
            let rows = sqlx::query_as::<_, PerformanceSummary>(
                "SELECT player_name, match_date, venue, runs, wickets, catches \
                 FROM match_performance_summary",
            )
            .fetch_all(pool)
            .await?;
            rows.iter()
                .map(|r| serde_json::to_value(r).map_err(|e| AppError::BadRequest(e.to_string())))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(name: Option<&str>, runs: Option<i32>) -> ScorerRow {
        ScorerRow {
            player_name: name.map(String::from),
            runs,
        }
    }

    #[test]
    fn predefined_statements_resolve_to_their_own_path() {
        for q in CannedQuery::PREDEFINED {
            assert_eq!(CannedQuery::resolve(q.sql()), Some(q), "query {:?}", q);
        }
    }

    #[test]
    fn view_reference_wins_over_other_matches() {
        let text = "select * from match_performance_summary where awards = 1";
        assert_eq!(
            CannedQuery::resolve(text),
            Some(CannedQuery::PerformanceSummary)
        );
    }

    #[test]
    fn substring_matches_out_of_context_still_dispatch() {
        // "awards" inside arbitrary text is enough.
        assert_eq!(
            CannedQuery::resolve("-- looking at awards here"),
            Some(CannedQuery::PlayersWithAwards)
        );
    }

    #[test]
    fn unmatched_text_resolves_to_nothing() {
        assert_eq!(CannedQuery::resolve("SELECT * FROM teams;"), None);
        assert_eq!(CannedQuery::resolve(""), None);
    }

    #[test]
    fn resolution_is_case_insensitive() {
        assert_eq!(
            CannedQuery::resolve("SELECT ... FROM MATCH_SCORES"),
            Some(CannedQuery::MatchSummary)
        );
    }

    #[test]
    fn top_scorers_groups_sums_and_truncates() {
        let rows = vec![
            scorer(Some("A"), Some(10)),
            scorer(Some("B"), Some(50)),
            scorer(Some("A"), Some(25)),
            scorer(Some("C"), Some(5)),
            scorer(Some("D"), Some(40)),
            scorer(Some("E"), Some(30)),
            scorer(Some("F"), Some(20)),
        ];
        let out = aggregate_top_scorers(&rows);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0]["player_name"], "B");
        assert_eq!(out[0]["total_runs"], 50);
        assert_eq!(out[1]["player_name"], "D");
        // A = 10 + 25
        assert_eq!(out[2]["player_name"], "A");
        assert_eq!(out[2]["total_runs"], 35);
    }

    #[test]
    fn null_runs_and_missing_names_are_tolerated() {
        let rows = vec![scorer(None, Some(7)), scorer(None, None)];
        let out = aggregate_top_scorers(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["player_name"], "Unknown");
        assert_eq!(out[0]["total_runs"], 7);
    }

    #[test]
    fn aggregate_beats_awards_in_priority_order() {
        let text = "select sum(runs) from performance -- awards ceremony";
        assert_eq!(CannedQuery::resolve(text), Some(CannedQuery::TopRunScorers));
    }

    #[test]
    fn match_score_rows_flatten_in_display_key_order() {
        let rows = vec![MatchScoreRow {
            match_id: 3,
            match_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            venue: Some("Eden Gardens".into()),
            team_name: Some("India".into()),
            score: 250,
        }];
        let out = flatten_match_scores(&rows);
        let keys: Vec<&String> = out[0].as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            ["match_id", "match_date", "venue", "team_name", "score"]
        );
        assert_eq!(out[0]["score"], 250);
    }

    #[test]
    fn result_rows_shape_winner_and_margin() {
        let rows = vec![ResultRow {
            match_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            venue: None,
            winner: Some("Australia".into()),
            margin: Some(12),
        }];
        let out = shape_result_rows(&rows);
        assert_eq!(out[0]["winner"], "Australia");
        assert_eq!(out[0]["margin"], 12);
        assert!(out[0]["venue"].is_null());
    }

    #[test]
    fn canned_query_ids_round_trip_through_serde() {
        let id: CannedQuery = serde_json::from_str("\"top_run_scorers\"").unwrap();
        assert_eq!(id, CannedQuery::TopRunScorers);
        assert_eq!(
            serde_json::to_string(&CannedQuery::MatchResults).unwrap(),
            "\"match_results\""
        );
    }
}
