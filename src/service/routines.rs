//! Stored-procedure and stored-function simulators. Neither routine exists
//! in the database; the service mimics their effects with plain statements
//! and sums client-side.

use crate::error::AppError;
use crate::schema::Performance;
use crate::service::crud::NewPerformance;
use sqlx::PgPool;

/// `CALL insert_performance(...)` equivalent: upsert keyed on
/// (player_id, match_id).
pub async fn upsert_performance(
    pool: &PgPool,
    input: &NewPerformance,
) -> Result<Performance, AppError> {
    tracing::debug!(table = "performance", "upsert");
    let perf = sqlx::query_as::<_, Performance>(
        "INSERT INTO performance (player_id, match_id, runs, wickets, catches) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (player_id, match_id) DO UPDATE \
         SET runs = EXCLUDED.runs, wickets = EXCLUDED.wickets, catches = EXCLUDED.catches \
         RETURNING performance_id, player_id, match_id, runs, wickets, catches",
    )
    .bind(input.player_id)
    .bind(input.match_id)
    .bind(input.runs)
    .bind(input.wickets)
    .bind(input.catches)
    .fetch_one(pool)
    .await?;
    Ok(perf)
}

/// `SELECT get_total_runs(...)` equivalent: read the player's performance
/// rows and sum here, not in the database.
pub async fn total_runs(pool: &PgPool, player_id: i64) -> Result<i64, AppError> {
    let runs: Vec<(Option<i32>,)> =
        sqlx::query_as("SELECT runs FROM performance WHERE player_id = $1")
            .bind(player_id)
            .fetch_all(pool)
            .await?;
    Ok(sum_runs(runs.iter().map(|(r,)| *r)))
}

/// Null runs count zero; no rows sum to zero.
pub fn sum_runs<I: IntoIterator<Item = Option<i32>>>(runs: I) -> i64 {
    runs.into_iter()
        .map(|r| i64::from(r.unwrap_or(0)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_runs_across_performances() {
        assert_eq!(sum_runs([Some(10), Some(0), Some(25)]), 35);
    }

    #[test]
    fn no_performance_rows_sum_to_zero() {
        assert_eq!(sum_runs([]), 0);
    }

    #[test]
    fn null_runs_count_zero() {
        assert_eq!(sum_runs([Some(12), None, Some(3)]), 15);
    }
}
