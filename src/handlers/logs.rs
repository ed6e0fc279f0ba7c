//! Audit log view: the most recent synthesized statements.

use crate::error::AppError;
use crate::response::{MetaCount, SuccessMany};
use crate::schema::SqlLog;
use crate::service::audit;
use crate::state::AppState;
use axum::{extract::State, Json};

const LOG_LIMIT: i64 = 20;

pub async fn recent_logs(
    State(state): State<AppState>,
) -> Result<Json<SuccessMany<SqlLog>>, AppError> {
    let logs = audit::recent(&state.pool, LOG_LIMIT).await?;
    let count = logs.len() as u64;
    Ok(Json(SuccessMany {
        data: logs,
        meta: MetaCount { count },
    }))
}
