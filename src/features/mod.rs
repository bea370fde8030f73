//! Feature implementations for fittrack.
//!
//! - Workout plans and their exercises
//! - Timed workout sessions
//! - Session history and reports

pub mod history;
pub mod plans;
pub mod session;
