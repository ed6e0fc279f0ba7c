//! Database bootstrap: idempotent DDL for the cricket schema, the
//! `match_performance_summary` view, and the result-derivation triggers.
//!
//! The winner/margin derivation is deliberately a database-side contract:
//! application code inserts scores and reads `match_result`, nothing more.

use crate::error::AppError;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        team_id BIGSERIAL PRIMARY KEY,
        team_name TEXT NOT NULL,
        coach TEXT,
        country TEXT,
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS players (
        player_id BIGSERIAL PRIMARY KEY,
        player_name TEXT NOT NULL,
        dob DATE,
        role TEXT,
        team_id BIGINT REFERENCES teams(team_id),
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        match_id BIGSERIAL PRIMARY KEY,
        match_date DATE NOT NULL,
        venue TEXT,
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS performance (
        performance_id BIGSERIAL PRIMARY KEY,
        player_id BIGINT REFERENCES players(player_id),
        match_id BIGINT REFERENCES matches(match_id),
        runs INT,
        wickets INT,
        catches INT,
        UNIQUE (player_id, match_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS awards (
        award_id BIGSERIAL PRIMARY KEY,
        award_name TEXT NOT NULL,
        player_id BIGINT REFERENCES players(player_id),
        match_id BIGINT REFERENCES matches(match_id),
        created_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS match_scores (
        score_id BIGSERIAL PRIMARY KEY,
        match_id BIGINT REFERENCES matches(match_id),
        team_id BIGINT REFERENCES teams(team_id),
        score INT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS match_result (
        result_id BIGSERIAL PRIMARY KEY,
        match_id BIGINT UNIQUE REFERENCES matches(match_id),
        winner_team_id BIGINT REFERENCES teams(team_id),
        margin INT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sql_logs (
        log_id BIGSERIAL PRIMARY KEY,
        sql_text TEXT NOT NULL,
        operation_type TEXT,
        executed_at TIMESTAMPTZ DEFAULT NOW()
    )
    "#,
];

const VIEW_DDL: &str = r#"
    CREATE OR REPLACE VIEW match_performance_summary AS
    SELECT p.player_name, m.match_date, m.venue, per.runs, per.wickets, per.catches
    FROM performance per
    JOIN players p ON per.player_id = p.player_id
    JOIN matches m ON per.match_id = m.match_id
"#;

/// Once both team scores for a match exist, upsert the derived result:
/// winner is the higher-scoring team, margin the score difference.
const DERIVE_RESULT_FN: &str = r#"
    CREATE OR REPLACE FUNCTION derive_match_result() RETURNS TRIGGER AS $$
    DECLARE
        n INT;
        top RECORD;
        bottom RECORD;
    BEGIN
        SELECT COUNT(*) INTO n FROM match_scores WHERE match_id = NEW.match_id;
        IF n >= 2 THEN
            SELECT team_id, score INTO top
                FROM match_scores WHERE match_id = NEW.match_id
                ORDER BY score DESC, score_id ASC LIMIT 1;
            SELECT team_id, score INTO bottom
                FROM match_scores WHERE match_id = NEW.match_id
                ORDER BY score ASC, score_id DESC LIMIT 1;
            INSERT INTO match_result (match_id, winner_team_id, margin)
            VALUES (NEW.match_id, top.team_id, top.score - bottom.score)
            ON CONFLICT (match_id) DO UPDATE
                SET winner_team_id = EXCLUDED.winner_team_id,
                    margin = EXCLUDED.margin;
        END IF;
        RETURN NEW;
    END;
    $$ LANGUAGE plpgsql
"#;

const DERIVE_RESULT_TRIGGER: &[&str] = &[
    "DROP TRIGGER IF EXISTS trg_derive_match_result ON match_scores",
    r#"
    CREATE TRIGGER trg_derive_match_result
    AFTER INSERT OR UPDATE ON match_scores
    FOR EACH ROW EXECUTE FUNCTION derive_match_result()
    "#,
];

/// Channel the result listener subscribes to.
pub const RESULT_CHANNEL: &str = "match_result_changes";

const NOTIFY_RESULT_FN: &str = r#"
    CREATE OR REPLACE FUNCTION notify_match_result() RETURNS TRIGGER AS $$
    BEGIN
        PERFORM pg_notify('match_result_changes', TG_OP);
        RETURN NULL;
    END;
    $$ LANGUAGE plpgsql
"#;

const NOTIFY_RESULT_TRIGGER: &[&str] = &[
    "DROP TRIGGER IF EXISTS trg_notify_match_result ON match_result",
    r#"
    CREATE TRIGGER trg_notify_match_result
    AFTER INSERT OR UPDATE OR DELETE ON match_result
    FOR EACH ROW EXECUTE FUNCTION notify_match_result()
    "#,
];

/// Create all tables, the view, and the trigger pair. Safe to run at every
/// startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLE_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    sqlx::query(VIEW_DDL).execute(pool).await?;
    sqlx::query(DERIVE_RESULT_FN).execute(pool).await?;
    for ddl in DERIVE_RESULT_TRIGGER {
        sqlx::query(ddl).execute(pool).await?;
    }
    sqlx::query(NOTIFY_RESULT_FN).execute(pool).await?;
    for ddl in NOTIFY_RESULT_TRIGGER {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects
/// to the default `postgres` database to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_name_parsed_from_url() {
        let (admin, name) =
            parse_db_name_from_url("postgres://u:p@localhost:5432/cricket?sslmode=disable")
                .unwrap();
        assert_eq!(name, "cricket");
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
    }

    #[test]
    fn postgres_database_is_left_alone() {
        let (_, name) = parse_db_name_from_url("postgres://localhost/postgres").unwrap();
        assert_eq!(name, "postgres");
    }
}
