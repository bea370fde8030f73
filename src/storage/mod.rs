//! Storage layer for fittrack.
//!
//! This module provides SQLite-based persistence for:
//! - Workout plans and exercises
//! - Session history

mod database;
mod migrations;

pub use database::Database;

