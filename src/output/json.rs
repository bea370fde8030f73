//! JSON output formatting for fittrack.

use serde::Serialize;
use serde_json::json;

use crate::error::FitTrackError;
use crate::features::plans::WorkoutPlan;
use crate::features::session::SessionSummary;

/// Format plans as JSON
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_plans_json(plans: &[WorkoutPlan]) -> Result<String, FitTrackError> {
    let output = json!({
        "count": plans.len(),
        "items": plans
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format session history as JSON
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn format_history_json(sessions: &[SessionSummary], title: &str) -> Result<String, FitTrackError> {
    let output = json!({
        "list": title,
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FitTrackError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FitTrackError> {
    Ok(serde_json::to_string_pretty(value)?)
}
