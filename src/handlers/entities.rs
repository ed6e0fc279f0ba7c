//! Entity create/list handlers: teams, players, matches, performances,
//! awards. Create responses carry the synthesized display SQL and the
//! reloaded table, mirroring the form pages.

use crate::error::AppError;
use crate::render::TableView;
use crate::schema::{AWARD_NAMES, PLAYER_ROLES};
use crate::service::audit::{self, OpKind};
use crate::service::crud::{
    self, NewAward, NewMatch, NewPerformance, NewPlayer, NewTeam,
};
use crate::sql;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Created<T> {
    pub data: T,
    pub sql: String,
    pub table: TableView,
}

#[derive(Serialize)]
pub struct Listing<T> {
    pub data: Vec<T>,
    pub count: u64,
    pub table: TableView,
}

fn listing<T: Serialize>(rows: Vec<T>) -> Json<Listing<T>> {
    let table = TableView::from_records(&rows);
    let count = rows.len() as u64;
    Json(Listing {
        data: rows,
        count,
        table,
    })
}

pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<NewTeam>,
) -> Result<(StatusCode, Json<Created<crate::schema::Team>>), AppError> {
    let display = sql::insert_team(&body.team_name, body.coach.as_deref(), body.country.as_deref());
    let team = crud::create_team(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Insert).await;
    let all = crud::list_teams(&state.pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            data: team,
            sql: display,
            table: TableView::from_records(&all),
        }),
    ))
}

pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<Listing<crate::schema::Team>>, AppError> {
    Ok(listing(crud::list_teams(&state.pool).await?))
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(body): Json<NewPlayer>,
) -> Result<(StatusCode, Json<Created<crate::schema::Player>>), AppError> {
    let display = sql::insert_player(
        &body.player_name,
        body.dob,
        body.team_id,
        body.role.as_deref(),
    );
    let player = crud::create_player(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Insert).await;
    let all = crud::list_players(&state.pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            data: player,
            sql: display,
            table: TableView::from_records(&all),
        }),
    ))
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Listing<crate::schema::Player>>, AppError> {
    Ok(listing(crud::list_players(&state.pool).await?))
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(body): Json<NewMatch>,
) -> Result<(StatusCode, Json<Created<crate::schema::Match>>), AppError> {
    let display = sql::insert_match(body.match_date, body.venue.as_deref());
    let m = crud::create_match(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Insert).await;
    let all = crud::list_matches(&state.pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            data: m,
            sql: display,
            table: TableView::from_records(&all),
        }),
    ))
}

pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<Listing<crate::schema::Match>>, AppError> {
    Ok(listing(crud::list_matches(&state.pool).await?))
}

pub async fn create_performance(
    State(state): State<AppState>,
    Json(body): Json<NewPerformance>,
) -> Result<(StatusCode, Json<Created<crate::schema::Performance>>), AppError> {
    let display = sql::insert_performance(
        body.player_id,
        body.match_id,
        body.runs,
        body.wickets,
        body.catches,
    );
    let perf = crud::create_performance(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Insert).await;
    let all = crud::list_performances(&state.pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            data: perf,
            sql: display,
            table: TableView::from_records(&all),
        }),
    ))
}

pub async fn list_performances(
    State(state): State<AppState>,
) -> Result<Json<Listing<crate::schema::Performance>>, AppError> {
    Ok(listing(crud::list_performances(&state.pool).await?))
}

pub async fn create_award(
    State(state): State<AppState>,
    Json(body): Json<NewAward>,
) -> Result<(StatusCode, Json<Created<crate::schema::Award>>), AppError> {
    let display = sql::insert_award(body.player_id, body.match_id, &body.award_name);
    let award = crud::create_award(&state.pool, &body).await?;
    audit::record_or_warn(&state.pool, &display, OpKind::Insert).await;
    let all = crud::list_awards(&state.pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(Created {
            data: award,
            sql: display,
            table: TableView::from_records(&all),
        }),
    ))
}

pub async fn list_awards(
    State(state): State<AppState>,
) -> Result<Json<Listing<crate::schema::Award>>, AppError> {
    Ok(listing(crud::list_awards(&state.pool).await?))
}

#[derive(Serialize)]
pub struct FormOptions {
    pub player_roles: &'static [&'static str],
    pub award_names: &'static [&'static str],
}

/// Fixed pick lists used by the player and award forms.
pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions {
        player_roles: PLAYER_ROLES,
        award_names: AWARD_NAMES,
    })
}
