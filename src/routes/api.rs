//! The /api/v1 surface: one route group per page of the dashboard.

use crate::handlers::{dashboard, entities, logs, queries, results, routines};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/teams", get(entities::list_teams).post(entities::create_team))
        .route(
            "/players",
            get(entities::list_players).post(entities::create_player),
        )
        .route(
            "/matches",
            get(entities::list_matches).post(entities::create_match),
        )
        .route(
            "/performances",
            get(entities::list_performances).post(entities::create_performance),
        )
        .route(
            "/awards",
            get(entities::list_awards).post(entities::create_award),
        )
        .route("/options", get(entities::form_options))
        .route("/queries", get(queries::list_predefined))
        .route("/queries/run", post(queries::run_query))
        .route("/procedures/insert-performance", post(routines::insert_performance))
        .route("/functions/total-runs", post(routines::total_runs))
        .route("/results", get(results::list_results))
        .route("/results/scores", post(results::insert_scores))
        .route("/results/feed", get(results::results_feed))
        .route("/logs", get(logs::recent_logs))
        .with_state(state)
}
