//! Command-line interface for fittrack.

pub mod args;
pub mod commands;
