//! Derived match results: reads of the trigger-maintained `match_result`
//! table, the score-pair insert that feeds it, and the change-notification
//! bridge for live feeds.

use crate::error::AppError;
use crate::store::RESULT_CHANNEL;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgListener;
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::broadcast;

/// One change notification from the `match_result` table.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEvent {
    /// Trigger operation: INSERT, UPDATE or DELETE.
    pub op: String,
}

/// One derived result row, joined for display.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DerivedResult {
    pub match_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub winner: Option<String>,
    pub margin: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreEntry {
    pub team_id: i64,
    pub score: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewScorePair {
    pub match_id: i64,
    pub team1: ScoreEntry,
    pub team2: ScoreEntry,
}

/// Latest derived results, newest first.
pub async fn latest_results(pool: &PgPool, limit: i64) -> Result<Vec<DerivedResult>, AppError> {
    let rows = sqlx::query_as::<_, DerivedResult>(
        "SELECT mr.match_id, m.match_date AS date, m.venue, t.team_name AS winner, mr.margin \
         FROM match_result mr \
         LEFT JOIN matches m ON mr.match_id = m.match_id \
         LEFT JOIN teams t ON mr.winner_team_id = t.team_id \
         ORDER BY mr.result_id DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert both team scores back-to-back. Deliberately not transactional:
/// if the second insert fails the first stays committed, and the derivation
/// trigger simply waits for the missing score.
pub async fn insert_score_pair(pool: &PgPool, pair: &NewScorePair) -> Result<(), AppError> {
    for entry in [&pair.team1, &pair.team2] {
        tracing::debug!(table = "match_scores", match_id = pair.match_id, "insert");
        sqlx::query("INSERT INTO match_scores (match_id, team_id, score) VALUES ($1, $2, $3)")
            .bind(pair.match_id)
            .bind(entry.team_id)
            .bind(entry.score)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Long-running task: hold a LISTEN subscription on the match_result channel
/// and forward every notification to the broadcast sender. Reconnects with a
/// short pause after connection loss.
pub async fn listen_for_results(pool: PgPool, tx: broadcast::Sender<ResultEvent>) {
    loop {
        match run_listener(&pool, &tx).await {
            Ok(()) => return,
            Err(e) => {
                tracing::warn!(error = %e, "result listener disconnected, retrying");
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

async fn run_listener(
    pool: &PgPool,
    tx: &broadcast::Sender<ResultEvent>,
) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(RESULT_CHANNEL).await?;
    tracing::info!(channel = RESULT_CHANNEL, "listening for result changes");
    loop {
        let notification = listener.recv().await?;
        let event = ResultEvent {
            op: notification.payload().to_string(),
        };
        // No receivers is fine; sockets come and go.
        let _ = tx.send(event);
    }
}
