//! Dashboard tallies and summary panels.

use crate::error::AppError;
use crate::render::TableView;
use crate::schema::table;
use crate::service::crud;
use crate::service::query::{aggregate_top_scorers, ScorerRow};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct DashboardStats {
    pub players: i64,
    pub teams: i64,
    pub matches: i64,
    pub awards: i64,
}

#[derive(Serialize)]
pub struct DashboardBody {
    pub stats: DashboardStats,
    pub top_scorers: Vec<Value>,
    pub top_scorers_table: TableView,
    pub recent_performances: Vec<crate::schema::PerformanceSummary>,
    pub recent_performances_table: TableView,
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardBody>, AppError> {
    let stats = DashboardStats {
        players: crud::exact_count(&state.pool, table::PLAYERS).await?,
        teams: crud::exact_count(&state.pool, table::TEAMS).await?,
        matches: crud::exact_count(&state.pool, table::MATCHES).await?,
        awards: crud::exact_count(&state.pool, table::AWARDS).await?,
    };

    // Ten highest single-innings rows, then the local aggregation keeps the
    // top five totals. The pre-aggregation limit is intentional.
    let scorer_rows = sqlx::query_as::<_, ScorerRow>(
        "SELECT p.player_name, per.runs FROM performance per \
         LEFT JOIN players p ON per.player_id = p.player_id \
         ORDER BY per.runs DESC NULLS LAST LIMIT 10",
    )
    .fetch_all(&state.pool)
    .await?;
    let top_scorers = aggregate_top_scorers(&scorer_rows);

    let recent = crud::performance_summary(&state.pool, Some(10)).await?;

    Ok(Json(DashboardBody {
        stats,
        top_scorers_table: TableView::from_rows(&top_scorers),
        top_scorers,
        recent_performances_table: TableView::from_records(&recent),
        recent_performances: recent,
    }))
}
