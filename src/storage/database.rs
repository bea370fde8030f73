//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.fittrack/fittrack.db` and contains tables for:
//! - Workout plans and their exercises
//! - Finished session history

use std::path::Path;

use rusqlite::Connection;

use crate::error::FitTrackError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, FitTrackError> {
        let conn = Connection::open(path).map_err(|e| {
            FitTrackError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "database.opened");

        Self::from_connection(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FitTrackError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FitTrackError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, FitTrackError> {
        // Exercises cascade with their plan
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| FitTrackError::Database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        migrations::run(&db.conn)?;

        Ok(db)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FitTrackError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
