//! Append-only audit trail of synthesized SQL statements. Rows are never
//! updated or deleted by this application.

use crate::error::AppError;
use crate::schema::SqlLog;
use sqlx::PgPool;

/// Operation tag attached to each audit entry. UPDATE and DELETE exist only
/// for display compatibility; no code path emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Select,
    Insert,
    Update,
    Delete,
    Procedure,
    Function,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Select => "SELECT",
            OpKind::Insert => "INSERT",
            OpKind::Update => "UPDATE",
            OpKind::Delete => "DELETE",
            OpKind::Procedure => "PROCEDURE",
            OpKind::Function => "FUNCTION",
        }
    }
}

/// Append one audit row.
pub async fn record(pool: &PgPool, sql_text: &str, op: OpKind) -> Result<(), AppError> {
    sqlx::query("INSERT INTO sql_logs (sql_text, operation_type) VALUES ($1, $2)")
        .bind(sql_text)
        .bind(op.as_str())
        .execute(pool)
        .await?;
    Ok(())
}

/// Append one audit row for an action that already committed. An audit
/// failure must not fail the action, so it is only warned about.
pub async fn record_or_warn(pool: &PgPool, sql_text: &str, op: OpKind) {
    if let Err(e) = record(pool, sql_text, op).await {
        tracing::warn!(error = %e, op = op.as_str(), "audit log write failed");
    }
}

/// Most recent entries, newest first.
pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<SqlLog>, AppError> {
    let logs = sqlx::query_as::<_, SqlLog>(
        "SELECT log_id, sql_text, operation_type, executed_at FROM sql_logs \
         ORDER BY executed_at DESC, log_id DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_tags_match_display_convention() {
        assert_eq!(OpKind::Select.as_str(), "SELECT");
        assert_eq!(OpKind::Insert.as_str(), "INSERT");
        assert_eq!(OpKind::Procedure.as_str(), "PROCEDURE");
        assert_eq!(OpKind::Function.as_str(), "FUNCTION");
    }
}
