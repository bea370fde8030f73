//! Workout plan storage.
//!
//! Persists plans and their ordered exercises to the local database.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::{Exercise, WorkoutPlan};
use crate::error::FitTrackError;
use crate::storage::Database;

/// Storage for workout plans.
#[derive(Clone)]
pub struct PlanStorage {
    db: Rc<Database>,
}

impl PlanStorage {
    /// Create plan storage on a shared database connection.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Create a plan with its exercises in the given order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name or an invalid exercise, or a
    /// database error if the insert fails.
    pub fn create(&self, name: &str, exercises: &[Exercise]) -> Result<WorkoutPlan, FitTrackError> {
        let name = validate_plan_name(name)?;
        for exercise in exercises {
            exercise.validate()?;
        }

        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| FitTrackError::Database(format!("Failed to begin transaction: {e}")))?;

        let created_at = Utc::now();
        tx.execute(
            "INSERT INTO workout_plans (name, created_at) VALUES (?1, ?2)",
            params![name, created_at.to_rfc3339()],
        )
        .map_err(|e| FitTrackError::Database(format!("Failed to insert plan: {e}")))?;
        let plan_id = tx.last_insert_rowid();

        let mut stored = Vec::with_capacity(exercises.len());
        for (position, exercise) in exercises.iter().enumerate() {
            let position = i64::try_from(position).unwrap_or(i64::MAX);
            let id = insert_exercise(&tx, plan_id, position, exercise)?;
            stored.push(Exercise {
                id: Some(id),
                ..exercise.clone()
            });
        }

        tx.commit()
            .map_err(|e| FitTrackError::Database(format!("Failed to commit plan: {e}")))?;

        tracing::info!(plan_id, exercises = stored.len(), "plan.created");

        Ok(WorkoutPlan {
            id: plan_id,
            name,
            created_at,
            exercises: stored,
        })
    }

    /// Append an exercise to the end of a plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan does not exist, `InvalidInput` for an
    /// invalid exercise, or a database error.
    pub fn add_exercise(&self, plan_id: i64, exercise: &Exercise) -> Result<Exercise, FitTrackError> {
        exercise.validate()?;
        if !self.exists(plan_id)? {
            return Err(FitTrackError::NotFound(format!("workout plan {plan_id}")));
        }

        let conn = self.db.connection();
        let position: i64 = conn
            .query_row(
                "SELECT COALESCE(MAX(position) + 1, 0) FROM exercises WHERE plan_id = ?1",
                [plan_id],
                |row| row.get(0),
            )
            .map_err(|e| FitTrackError::Database(format!("Failed to query position: {e}")))?;

        let id = insert_exercise(conn, plan_id, position, exercise)?;
        tracing::info!(plan_id, exercise_id = id, "plan.exercise_added");

        Ok(Exercise {
            id: Some(id),
            ..exercise.clone()
        })
    }

    /// Remove one exercise.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove_exercise(&self, exercise_id: i64) -> Result<bool, FitTrackError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM exercises WHERE id = ?1", [exercise_id])
            .map_err(|e| FitTrackError::Database(format!("Failed to delete exercise: {e}")))?;

        Ok(rows > 0)
    }

    /// Get a plan with its exercises in session order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, plan_id: i64) -> Result<Option<WorkoutPlan>, FitTrackError> {
        let conn = self.db.connection();

        let header = conn
            .query_row(
                "SELECT id, name, created_at FROM workout_plans WHERE id = ?1",
                [plan_id],
                row_to_header,
            )
            .optional()
            .map_err(|e| FitTrackError::Database(format!("Failed to query plan: {e}")))?;

        let Some((id, name, created_at)) = header else {
            return Ok(None);
        };

        Ok(Some(WorkoutPlan {
            id,
            name,
            created_at,
            exercises: self.exercises_for(id)?,
        }))
    }

    /// List all plans, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<WorkoutPlan>, FitTrackError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, name, created_at FROM workout_plans ORDER BY id ASC")
            .map_err(|e| FitTrackError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_header)
            .map_err(|e| FitTrackError::Database(format!("Failed to query plans: {e}")))?;

        let mut plans = Vec::new();
        for row in rows {
            let (id, name, created_at) = row.map_err(|e| FitTrackError::Database(e.to_string()))?;
            plans.push(WorkoutPlan {
                id,
                name,
                created_at,
                exercises: self.exercises_for(id)?,
            });
        }

        Ok(plans)
    }

    /// Rename a plan. Past history entries keep the old name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name or a database error.
    pub fn rename(&self, plan_id: i64, name: &str) -> Result<bool, FitTrackError> {
        let name = validate_plan_name(name)?;
        let rows = self
            .db
            .connection()
            .execute(
                "UPDATE workout_plans SET name = ?1 WHERE id = ?2",
                params![name, plan_id],
            )
            .map_err(|e| FitTrackError::Database(format!("Failed to rename plan: {e}")))?;

        Ok(rows > 0)
    }

    /// Delete a plan and its exercises. Session history is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, plan_id: i64) -> Result<bool, FitTrackError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM workout_plans WHERE id = ?1", [plan_id])
            .map_err(|e| FitTrackError::Database(format!("Failed to delete plan: {e}")))?;

        if rows > 0 {
            tracing::info!(plan_id, "plan.deleted");
        }
        Ok(rows > 0)
    }

    fn exists(&self, plan_id: i64) -> Result<bool, FitTrackError> {
        let count: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM workout_plans WHERE id = ?1",
                [plan_id],
                |row| row.get(0),
            )
            .map_err(|e| FitTrackError::Database(format!("Failed to query plan: {e}")))?;

        Ok(count > 0)
    }

    fn exercises_for(&self, plan_id: i64) -> Result<Vec<Exercise>, FitTrackError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, name, sets, reps, work_seconds, rest_seconds
                  FROM exercises
                  WHERE plan_id = ?1
                  ORDER BY position ASC, id ASC",
            )
            .map_err(|e| FitTrackError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([plan_id], row_to_exercise)
            .map_err(|e| FitTrackError::Database(format!("Failed to query exercises: {e}")))?;

        let mut exercises = Vec::new();
        for row in rows {
            exercises.push(row.map_err(|e| FitTrackError::Database(e.to_string()))?);
        }

        Ok(exercises)
    }
}

fn validate_plan_name(name: &str) -> Result<String, FitTrackError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FitTrackError::InvalidInput(
            "plan name must not be empty".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn insert_exercise(
    conn: &rusqlite::Connection,
    plan_id: i64,
    position: i64,
    exercise: &Exercise,
) -> Result<i64, FitTrackError> {
    conn.execute(
        r"INSERT INTO exercises
          (plan_id, position, name, sets, reps, work_seconds, rest_seconds)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            plan_id,
            position,
            exercise.name.trim(),
            exercise.sets,
            exercise.reps,
            exercise.work_seconds,
            exercise.rest_seconds,
        ],
    )
    .map_err(|e| FitTrackError::Database(format!("Failed to insert exercise: {e}")))?;

    Ok(conn.last_insert_rowid())
}

fn row_to_header(row: &Row<'_>) -> Result<(i64, String, DateTime<Utc>), rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let created_at_str: String = row.get(2)?;

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok((id, name, created_at))
}

fn row_to_exercise(row: &Row<'_>) -> Result<Exercise, rusqlite::Error> {
    Ok(Exercise {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        sets: row.get(2)?,
        reps: row.get(3)?,
        work_seconds: row.get(4)?,
        rest_seconds: row.get(5)?,
    })
}
