//! Output formatting for fittrack.
//!
//! This module provides formatters for displaying plans, sessions and reports
//! in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::FitTrackError;
use crate::features::history::HistoryReport;
use crate::features::plans::WorkoutPlan;
use crate::features::session::SessionSummary;

pub use json::*;
pub use pretty::*;

/// Format plans based on output format
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_plans(plans: &[WorkoutPlan], format: OutputFormat) -> Result<String, FitTrackError> {
    match format {
        OutputFormat::Pretty => Ok(format_plans_pretty(plans)),
        OutputFormat::Json => format_plans_json(plans),
    }
}

/// Format a single plan based on output format
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_plan(
    plan: &WorkoutPlan,
    default_rest: u32,
    format: OutputFormat,
) -> Result<String, FitTrackError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(plan, default_rest)),
        OutputFormat::Json => to_json(plan),
    }
}

/// Format session history based on output format
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_history(
    sessions: &[SessionSummary],
    title: &str,
    format: OutputFormat,
) -> Result<String, FitTrackError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(sessions, title)),
        OutputFormat::Json => format_history_json(sessions, title),
    }
}

/// Format a single session based on output format
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_summary(summary: &SessionSummary, format: OutputFormat) -> Result<String, FitTrackError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

/// Format a history report based on output format
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_report(report: &HistoryReport, format: OutputFormat) -> Result<String, FitTrackError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}
