//! Database migrations for fittrack.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::FitTrackError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, FitTrackError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| FitTrackError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), FitTrackError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| FitTrackError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), FitTrackError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::info!(version, "database.migrating");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), FitTrackError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(FitTrackError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// `session_log` has no foreign key to `workout_plans`; history rows outlive
/// the plan they were recorded from.
fn migrate_v1(conn: &Connection) -> Result<(), FitTrackError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS workout_plans (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plan_id INTEGER NOT NULL REFERENCES workout_plans(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            sets INTEGER NOT NULL CHECK (sets >= 1),
            reps INTEGER NOT NULL DEFAULT 0,
            work_seconds INTEGER NOT NULL,
            rest_seconds INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_exercises_plan
        ON exercises(plan_id, position);

        CREATE TABLE IF NOT EXISTS session_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plan_id INTEGER NOT NULL,
            plan_name TEXT NOT NULL,
            started_at TEXT NOT NULL,
            ended_at TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_session_log_started
        ON session_log(started_at);
        ",
    )
    .map_err(|e| FitTrackError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO workout_plans (name, created_at) VALUES ('Monday', '2024-01-01T10:00:00Z')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO exercises (plan_id, position, name, sets, reps, work_seconds)
             VALUES (1, 0, 'Push ups', 3, 10, 30)",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO session_log (plan_id, plan_name, started_at, ended_at, duration_seconds)
             VALUES (1, 'Monday', '2024-01-01T10:00:00Z', '2024-01-01T10:30:00Z', 1800)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_zero_sets_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        conn.execute(
            "INSERT INTO workout_plans (name, created_at) VALUES ('Monday', '2024-01-01T10:00:00Z')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO exercises (plan_id, position, name, sets, reps, work_seconds)
             VALUES (1, 0, 'Squats', 0, 10, 30)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
