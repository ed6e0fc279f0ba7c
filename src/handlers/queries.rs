//! Query runner endpoints: the predefined statement list and execution of
//! tagged or free-text queries.

use crate::error::AppError;
use crate::render::TableView;
use crate::service::audit::{self, OpKind};
use crate::service::query::{self, CannedQuery};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
pub struct PredefinedQuery {
    pub id: CannedQuery,
    pub name: &'static str,
    pub description: &'static str,
    pub sql: &'static str,
}

pub async fn list_predefined() -> Json<Vec<PredefinedQuery>> {
    let queries = CannedQuery::PREDEFINED
        .into_iter()
        .map(|q| PredefinedQuery {
            id: q,
            name: q.name(),
            description: q.description(),
            sql: q.sql(),
        })
        .collect();
    Json(queries)
}

/// Either a tagged query id or free SQL-like text. The tagged form is the
/// primary interface; the text form exists for the freehand query box.
#[derive(Debug, Deserialize)]
pub struct RunQueryRequest {
    pub query: Option<CannedQuery>,
    pub sql: Option<String>,
}

#[derive(Serialize)]
pub struct RunQueryBody {
    /// The statement as displayed and logged.
    pub sql: String,
    /// The query the request resolved to, if any.
    pub query: Option<CannedQuery>,
    pub rows: Vec<Value>,
    pub count: u64,
    pub table: TableView,
}

pub async fn run_query(
    State(state): State<AppState>,
    Json(body): Json<RunQueryRequest>,
) -> Result<Json<RunQueryBody>, AppError> {
    let (resolved, display_sql) = match (body.query, body.sql) {
        (Some(q), _) => (Some(q), q.sql().to_string()),
        (None, Some(text)) if !text.trim().is_empty() => (CannedQuery::resolve(&text), text),
        _ => {
            return Err(AppError::BadRequest(
                "either 'query' or non-empty 'sql' is required".into(),
            ))
        }
    };

    // Unresolved text yields an empty result set, not an error.
    let rows = match resolved {
        Some(q) => query::run(&state.pool, q).await?,
        None => Vec::new(),
    };

    audit::record_or_warn(&state.pool, &display_sql, OpKind::Select).await;

    let count = rows.len() as u64;
    Ok(Json(RunQueryBody {
        sql: display_sql,
        query: resolved,
        table: TableView::from_rows(&rows),
        count,
        rows,
    }))
}
