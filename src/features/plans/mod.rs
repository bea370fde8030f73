//! Workout plans.
//!
//! A plan is a named, ordered list of exercises. Plans are the templates a
//! workout session runs through.

pub mod storage;
pub mod types;

pub use storage::PlanStorage;
pub use types::{Exercise, WorkoutPlan};
