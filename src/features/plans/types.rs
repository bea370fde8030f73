//! Workout plan and exercise types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FitTrackError;

/// One exercise of a workout plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Display name, e.g. "Push ups"
    pub name: String,
    /// Number of sets, at least 1
    pub sets: u32,
    /// Repetitions per set (informational only)
    pub reps: u32,
    /// Length of one work phase in seconds
    pub work_seconds: u32,
    /// Rest after each set in seconds; the session default applies when unset
    pub rest_seconds: Option<u32>,
}

impl Exercise {
    /// Create an exercise without a rest time of its own.
    #[must_use]
    pub fn new(name: impl Into<String>, sets: u32, reps: u32, work_seconds: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            sets,
            reps,
            work_seconds,
            rest_seconds: None,
        }
    }

    /// Set the rest time after each set.
    #[must_use]
    pub const fn with_rest(mut self, rest_seconds: u32) -> Self {
        self.rest_seconds = Some(rest_seconds);
        self
    }

    /// Check that the exercise can be stored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name or zero sets.
    pub fn validate(&self) -> Result<(), FitTrackError> {
        if self.name.trim().is_empty() {
            return Err(FitTrackError::InvalidInput(
                "exercise name must not be empty".to_string(),
            ));
        }
        if self.sets == 0 {
            return Err(FitTrackError::InvalidInput(format!(
                "exercise \"{}\" needs at least 1 set",
                self.name
            )));
        }
        Ok(())
    }
}

/// Parses `name:sets:reps:time[:rest]`, e.g. `Push ups:3:10:30:45`.
impl FromStr for Exercise {
    type Err = FitTrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if !(4..=5).contains(&parts.len()) {
            return Err(FitTrackError::InvalidInput(format!(
                "expected name:sets:reps:time[:rest], got \"{s}\""
            )));
        }

        let number = |field: &str, value: &str| {
            value.parse::<u32>().map_err(|_| {
                FitTrackError::InvalidInput(format!("{field} must be a whole number, got \"{value}\""))
            })
        };

        let mut exercise = Self::new(
            parts[0],
            number("sets", parts[1])?,
            number("reps", parts[2])?,
            number("time", parts[3])?,
        );
        if let Some(rest) = parts.get(4) {
            exercise.rest_seconds = Some(number("rest", rest)?);
        }

        exercise.validate()?;
        Ok(exercise)
    }
}

/// A user-authored workout plan: a name and an ordered list of exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Database ID
    pub id: i64,
    /// Plan name, e.g. "Monday"
    pub name: String,
    /// When the plan was created
    pub created_at: DateTime<Utc>,
    /// Exercises in session order
    pub exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    /// Total number of work phases a full run of this plan goes through.
    #[must_use]
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    /// Nominal length of an uninterrupted run in seconds.
    ///
    /// Counts every work phase and every rest phase except the one after the
    /// final set, using `default_rest` where an exercise has no rest time.
    #[must_use]
    pub fn nominal_seconds(&self, default_rest: u32) -> u64 {
        let mut total: u64 = 0;
        for exercise in &self.exercises {
            let rest = u64::from(exercise.rest_seconds.unwrap_or(default_rest));
            total += u64::from(exercise.sets) * (u64::from(exercise.work_seconds) + rest);
        }
        if let Some(last) = self.exercises.last() {
            total -= u64::from(last.rest_seconds.unwrap_or(default_rest));
        }
        total
    }
}
