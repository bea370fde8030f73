//! Session progression rules.

use crate::features::plans::Exercise;

/// Rest used when an exercise has no rest time and nothing else is configured.
pub const DEFAULT_REST_SECONDS: u32 = 60;

/// The final set of the final exercise is not followed by a rest.
#[must_use]
pub fn skips_rest(exercise_index: usize, current_set: u32, exercises: &[Exercise]) -> bool {
    let Some(exercise) = exercises.get(exercise_index) else {
        return true;
    };
    current_set >= exercise.sets && exercise_index + 1 == exercises.len()
}

/// Rest after a set of `exercise`, falling back to `default_rest`.
#[must_use]
pub fn rest_duration(exercise: &Exercise, default_rest: u32) -> u32 {
    exercise.rest_seconds.unwrap_or(default_rest)
}

/// Sets of `exercise` not yet started or in progress at `current_set`.
#[must_use]
pub const fn sets_remaining(exercise: &Exercise, current_set: u32) -> u32 {
    exercise.sets.saturating_add(1).saturating_sub(current_set)
}
