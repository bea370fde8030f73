//! Session history storage.
//!
//! Persists finished session summaries to the local database.

use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::error::FitTrackError;
use crate::features::session::SessionSummary;
use crate::storage::Database;

const SELECT_COLUMNS: &str =
    "SELECT id, plan_id, plan_name, started_at, ended_at, duration_seconds FROM session_log";

/// Storage for finished sessions.
#[derive(Clone)]
pub struct HistoryStorage {
    db: Rc<Database>,
}

impl HistoryStorage {
    /// Create history storage on a shared database connection.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Store a summary and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record(&self, summary: &SessionSummary) -> Result<i64, FitTrackError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO session_log
              (plan_id, plan_name, started_at, ended_at, duration_seconds)
              VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                summary.plan_id,
                summary.plan_name,
                format_timestamp(summary.started_at),
                format_timestamp(summary.ended_at),
                summary.duration_seconds,
            ],
        )
        .map_err(|e| FitTrackError::Database(format!("Failed to insert session: {e}")))?;

        Ok(conn.last_insert_rowid())
    }

    /// Get one entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<SessionSummary>, FitTrackError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_summary)
            .optional()
            .map_err(|e| FitTrackError::Database(format!("Failed to query session: {e}")))
    }

    /// Most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, limit: usize) -> Result<Vec<SessionSummary>, FitTrackError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            &format!("{SELECT_COLUMNS} ORDER BY started_at DESC, id DESC LIMIT ?1"),
            params![limit],
        )
    }

    /// All entries recorded for a plan, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_plan(&self, plan_id: i64) -> Result<Vec<SessionSummary>, FitTrackError> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE plan_id = ?1 ORDER BY started_at DESC, id DESC"),
            params![plan_id],
        )
    }

    /// Entries that started within `[start, end)`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SessionSummary>, FitTrackError> {
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE started_at >= ?1 AND started_at < ?2 ORDER BY started_at DESC, id DESC"
            ),
            params![format_timestamp(start), format_timestamp(end)],
        )
    }

    /// Delete one entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: i64) -> Result<bool, FitTrackError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM session_log WHERE id = ?1", [id])
            .map_err(|e| FitTrackError::Database(format!("Failed to delete session: {e}")))?;

        Ok(rows > 0)
    }

    /// Delete every entry, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, FitTrackError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM session_log", [])
            .map_err(|e| FitTrackError::Database(format!("Failed to clear history: {e}")))?;

        tracing::info!(rows, "history.cleared");
        Ok(rows)
    }

    fn query(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<SessionSummary>, FitTrackError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| FitTrackError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, row_to_summary)
            .map_err(|e| FitTrackError::Database(format!("Failed to query sessions: {e}")))?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row.map_err(|e| FitTrackError::Database(e.to_string()))?);
        }

        Ok(sessions)
    }
}

/// Fixed-width UTC timestamps so text order matches time order.
fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str, column: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_summary(row: &Row<'_>) -> Result<SessionSummary, rusqlite::Error> {
    let started_at: String = row.get(3)?;
    let ended_at: String = row.get(4)?;

    Ok(SessionSummary {
        id: Some(row.get(0)?),
        plan_id: row.get(1)?,
        plan_name: row.get(2)?,
        started_at: parse_timestamp(&started_at, 3)?,
        ended_at: parse_timestamp(&ended_at, 4)?,
        duration_seconds: row.get(5)?,
    })
}
