//! fittrack - workout plans, timed sessions and history in the terminal
//!
//! This crate provides a command-line interface for building workout plans,
//! running them with a work/rest countdown, and reviewing finished sessions
//! stored in a local SQLite database.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FitTrackError;
