//! Procedure/function simulator endpoints.

use crate::error::AppError;
use crate::schema::Performance;
use crate::service::audit::{self, OpKind};
use crate::service::crud::NewPerformance;
use crate::service::routines;
use crate::sql;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ProcedureBody {
    pub data: Performance,
    pub sql: String,
}

/// `CALL insert_performance(...)`: upsert keyed on (player_id, match_id).
pub async fn insert_performance(
    State(state): State<AppState>,
    Json(body): Json<NewPerformance>,
) -> Result<(StatusCode, Json<ProcedureBody>), AppError> {
    let display = sql::call_insert_performance(
        body.player_id,
        body.match_id,
        body.runs,
        body.wickets,
        body.catches,
    );
    let perf = routines::upsert_performance(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Procedure).await;
    Ok((
        StatusCode::OK,
        Json(ProcedureBody {
            data: perf,
            sql: display,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct TotalRunsRequest {
    pub player_id: i64,
}

#[derive(Serialize)]
pub struct TotalRunsBody {
    pub player_id: i64,
    pub total_runs: i64,
    pub sql: String,
}

/// `SELECT get_total_runs(...)`: client-side sum over the player's
/// performance rows.
pub async fn total_runs(
    State(state): State<AppState>,
    Json(body): Json<TotalRunsRequest>,
) -> Result<Json<TotalRunsBody>, AppError> {
    let display = sql::select_total_runs(body.player_id);
    let total = routines::total_runs(&state.pool, body.player_id).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Function).await;
    Ok(Json(TotalRunsBody {
        player_id: body.player_id,
        total_runs: total,
        sql: display,
    }))
}
