//! Shared application state for all routes.

use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::service::results::ResultEvent;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Fan-out for match_result change notifications; fed by the
    /// database listener task, consumed by live-feed sockets.
    pub results_tx: broadcast::Sender<ResultEvent>,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let (results_tx, _) = broadcast::channel(64);
        AppState { pool, results_tx }
    }
}
