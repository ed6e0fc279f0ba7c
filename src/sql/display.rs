//! Synthesizes the SQL-equivalent text for each user action. Values are
//! interpolated verbatim (no quoting or escaping): these strings are for
//! display and audit only, the real statements are parameterized elsewhere.

use chrono::NaiveDate;

fn opt_num<T: std::fmt::Display>(v: Option<T>) -> String {
    match v {
        Some(n) => n.to_string(),
        None => "NULL".into(),
    }
}

pub fn insert_team(team_name: &str, coach: Option<&str>, country: Option<&str>) -> String {
    format!(
        "INSERT INTO teams (team_name, coach, country) VALUES ('{}', '{}', '{}');",
        team_name,
        coach.unwrap_or(""),
        country.unwrap_or("")
    )
}

pub fn insert_player(
    player_name: &str,
    dob: Option<NaiveDate>,
    team_id: Option<i64>,
    role: Option<&str>,
) -> String {
    format!(
        "INSERT INTO players (player_name, dob, team_id, role) VALUES ('{}', '{}', {}, '{}');",
        player_name,
        dob.map(|d| d.to_string()).unwrap_or_default(),
        opt_num(team_id),
        role.unwrap_or("")
    )
}

pub fn insert_match(match_date: NaiveDate, venue: Option<&str>) -> String {
    format!(
        "INSERT INTO matches (match_date, venue) VALUES ('{}', '{}');",
        match_date,
        venue.unwrap_or("")
    )
}

pub fn insert_performance(
    player_id: i64,
    match_id: i64,
    runs: Option<i32>,
    wickets: Option<i32>,
    catches: Option<i32>,
) -> String {
    format!(
        "INSERT INTO performance (player_id, match_id, runs, wickets, catches) VALUES ({}, {}, {}, {}, {});",
        player_id,
        match_id,
        opt_num(runs),
        opt_num(wickets),
        opt_num(catches)
    )
}

pub fn insert_award(player_id: i64, match_id: i64, award_name: &str) -> String {
    format!(
        "INSERT INTO awards (player_id, match_id, award_name) VALUES ({}, {}, '{}');",
        player_id, match_id, award_name
    )
}

/// The two-row VALUES statement for a score pair, shaped exactly like the
/// statement the derivation trigger reacts to.
pub fn insert_score_pair(
    match_id: i64,
    team1_id: i64,
    score1: i32,
    team2_id: i64,
    score2: i32,
) -> String {
    format!(
        "INSERT INTO match_scores (match_id, team_id, score) VALUES\n({}, {}, {}),\n({}, {}, {});",
        match_id, team1_id, score1, match_id, team2_id, score2
    )
}

pub fn call_insert_performance(
    player_id: i64,
    match_id: i64,
    runs: Option<i32>,
    wickets: Option<i32>,
    catches: Option<i32>,
) -> String {
    format!(
        "CALL insert_performance({}, {}, {}, {}, {});",
        player_id,
        match_id,
        opt_num(runs),
        opt_num(wickets),
        opt_num(catches)
    )
}

pub fn select_total_runs(player_id: i64) -> String {
    format!("SELECT get_total_runs({});", player_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_insert_contains_every_field_literally() {
        let sql = insert_team("Mumbai Indians", Some("Mahela"), Some("India"));
        assert_eq!(
            sql,
            "INSERT INTO teams (team_name, coach, country) VALUES ('Mumbai Indians', 'Mahela', 'India');"
        );
    }

    #[test]
    fn player_insert_formats_date_and_fk() {
        let dob = NaiveDate::from_ymd_opt(1988, 11, 5).unwrap();
        let sql = insert_player("Virat Kohli", Some(dob), Some(3), Some("Batsman"));
        assert_eq!(
            sql,
            "INSERT INTO players (player_name, dob, team_id, role) VALUES ('Virat Kohli', '1988-11-05', 3, 'Batsman');"
        );
    }

    #[test]
    fn performance_insert_uses_bare_numbers() {
        let sql = insert_performance(1, 2, Some(10), Some(0), Some(1));
        assert_eq!(
            sql,
            "INSERT INTO performance (player_id, match_id, runs, wickets, catches) VALUES (1, 2, 10, 0, 1);"
        );
    }

    #[test]
    fn missing_numbers_render_as_null() {
        let sql = insert_performance(1, 2, None, Some(3), None);
        assert!(sql.contains("VALUES (1, 2, NULL, 3, NULL);"));
    }

    #[test]
    fn score_pair_is_a_two_row_values_statement() {
        let sql = insert_score_pair(7, 1, 250, 2, 245);
        assert_eq!(
            sql,
            "INSERT INTO match_scores (match_id, team_id, score) VALUES\n(7, 1, 250),\n(7, 2, 245);"
        );
    }

    #[test]
    fn routine_calls_mirror_their_signatures() {
        assert_eq!(
            call_insert_performance(4, 9, Some(55), Some(2), Some(0)),
            "CALL insert_performance(4, 9, 55, 2, 0);"
        );
        assert_eq!(select_total_runs(4), "SELECT get_total_runs(4);");
    }
}
