//! Derived match results: list, score-pair insert, and the live feed.
//!
//! The winner/margin rows come from the database trigger; these handlers
//! only read them and insert the scores that set the trigger off.

use crate::error::AppError;
use crate::render::TableView;
use crate::service::audit::{self, OpKind};
use crate::service::results::{self, DerivedResult, NewScorePair};
use crate::sql;
use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;

const RESULT_LIMIT: i64 = 10;

#[derive(Serialize)]
pub struct ResultsBody {
    pub data: Vec<DerivedResult>,
    pub count: u64,
    pub table: TableView,
}

fn results_body(rows: Vec<DerivedResult>) -> ResultsBody {
    let table = TableView::from_records(&rows);
    let count = rows.len() as u64;
    ResultsBody {
        data: rows,
        count,
        table,
    }
}

pub async fn list_results(State(state): State<AppState>) -> Result<Json<ResultsBody>, AppError> {
    let rows = results::latest_results(&state.pool, RESULT_LIMIT).await?;
    Ok(Json(results_body(rows)))
}

#[derive(Serialize)]
pub struct ScoresInsertedBody {
    pub sql: String,
    pub results: ResultsBody,
}

/// Insert both team scores, then reload the derived results (the trigger
/// has fired by the time the second insert returns).
pub async fn insert_scores(
    State(state): State<AppState>,
    Json(body): Json<NewScorePair>,
) -> Result<(StatusCode, Json<ScoresInsertedBody>), AppError> {
    let display = sql::insert_score_pair(
        body.match_id,
        body.team1.team_id,
        body.team1.score,
        body.team2.team_id,
        body.team2.score,
    );
    results::insert_score_pair(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Insert).await;
    let rows = results::latest_results(&state.pool, RESULT_LIMIT).await?;
    Ok((
        StatusCode::CREATED,
        Json(ScoresInsertedBody {
            sql: display,
            results: results_body(rows),
        }),
    ))
}

/// Live feed: pushes the reloaded derived results on every match_result
/// change notification. The broadcast subscription is dropped with the
/// socket.
pub async fn results_feed(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_feed(socket, state))
}

async fn handle_feed(socket: WebSocket, state: AppState) {
    tracing::debug!("result feed client connected");
    let mut rx = state.results_tx.subscribe();
    let (mut sender, mut receiver) = socket.split();

    // Initial snapshot so the client has something to display immediately.
    if send_results(&mut sender, &state).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Ok(_) => {
                        if send_results(&mut sender, &state).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(missed = n, "result feed lagged, resyncing");
                        if send_results(&mut sender, &state).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "result feed socket error");
                        break;
                    }
                    _ => {}
                }
            }
        }
    }
    tracing::debug!("result feed client disconnected");
}

async fn send_results(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    state: &AppState,
) -> Result<(), ()> {
    let rows = match results::latest_results(&state.pool, RESULT_LIMIT).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "result feed reload failed");
            return Ok(());
        }
    };
    let body = results_body(rows);
    let text = match serde_json::to_string(&body) {
        Ok(t) => t,
        Err(_) => return Ok(()),
    };
    sender.send(Message::Text(text)).await.map_err(|_| ())
}
