//! Generic record table: turns uniformly-shaped JSON rows into a
//! display-ready column/row grid. No sorting, filtering, or pagination.

use serde::Serialize;
use serde_json::Value;

/// Placeholder shown instead of a table when there are no rows.
pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
}

impl TableView {
    /// Columns come from the key set of the first record, in its key order;
    /// cells are stringified, with `-` for null, absent, or empty values.
    pub fn from_rows(rows: &[Value]) -> TableView {
        let Some(Value::Object(first)) = rows.first() else {
            return TableView {
                columns: Vec::new(),
                rows: Vec::new(),
                placeholder: Some(NO_DATA),
            };
        };
        let keys: Vec<String> = first.keys().cloned().collect();
        let columns = keys.iter().map(|k| header_label(k)).collect();
        let grid = rows
            .iter()
            .map(|row| {
                keys.iter()
                    .map(|k| cell_text(row.get(k)))
                    .collect::<Vec<_>>()
            })
            .collect();
        TableView {
            columns,
            rows: grid,
            placeholder: None,
        }
    }

    /// Convenience for serializable record slices.
    pub fn from_records<T: Serialize>(records: &[T]) -> TableView {
        let rows: Vec<Value> = records
            .iter()
            .map(|r| serde_json::to_value(r).unwrap_or(Value::Null))
            .collect();
        TableView::from_rows(&rows)
    }
}

fn header_label(key: &str) -> String {
    key.replace('_', " ").to_uppercase()
}

fn cell_text(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => "-".into(),
        Some(Value::String(s)) if s.is_empty() => "-".into(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_input_renders_placeholder_and_no_table() {
        let view = TableView::from_rows(&[]);
        assert!(view.columns.is_empty());
        assert!(view.rows.is_empty());
        assert_eq!(view.placeholder, Some("No data available"));
    }

    #[test]
    fn headers_come_from_first_record_keys() {
        let rows = vec![
            json!({"team_name": "India", "coach": "RD", "country": "IN"}),
            json!({"team_name": "Australia", "coach": null, "country": "AU"}),
        ];
        let view = TableView::from_rows(&rows);
        assert_eq!(view.columns, vec!["TEAM NAME", "COACH", "COUNTRY"]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.placeholder, None);
    }

    #[test]
    fn null_and_missing_cells_become_dash() {
        let rows = vec![
            json!({"player_name": "Kohli", "runs": 82, "role": null}),
            json!({"player_name": "Bumrah", "runs": 4}),
        ];
        let view = TableView::from_rows(&rows);
        assert_eq!(view.rows[0], vec!["Kohli", "82", "-"]);
        assert_eq!(view.rows[1], vec!["Bumrah", "4", "-"]);
    }

    #[test]
    fn empty_string_cell_becomes_dash() {
        let rows = vec![json!({"venue": ""})];
        let view = TableView::from_rows(&rows);
        assert_eq!(view.rows[0], vec!["-"]);
    }

    #[test]
    fn underscores_in_headers_become_spaces() {
        let rows = vec![json!({"match_date": "2024-03-01", "winner_team_id": 2})];
        let view = TableView::from_rows(&rows);
        assert_eq!(view.columns, vec!["MATCH DATE", "WINNER TEAM ID"]);
    }
}
