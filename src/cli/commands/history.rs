//! History command implementation.

use chrono::Local;
use colored::Colorize;

use crate::cli::args::{HistoryCommands, OutputFormat};
use crate::config::Config;
use crate::error::FitTrackError;
use crate::features::history::{HistoryReport, HistoryStorage};
use crate::output::{format_history, format_report, to_json};

/// Execute history subcommands.
///
/// # Errors
///
/// Returns an error if the entry does not exist, confirmation is missing,
/// or the database operation fails.
pub fn history(
    storage: &HistoryStorage,
    cmd: HistoryCommands,
    config: &Config,
    format: OutputFormat,
) -> Result<String, FitTrackError> {
    match cmd {
        HistoryCommands::List { limit, plan_id } => {
            let limit = limit.unwrap_or(config.history.default_limit);
            let (sessions, title) = match plan_id {
                Some(id) => {
                    let mut sessions = storage.list_for_plan(id)?;
                    sessions.truncate(limit);
                    (sessions, format!("History for plan {id}"))
                }
                None => (storage.list(limit)?, "History".to_string()),
            };
            format_history(&sessions, &title, format)
        }

        HistoryCommands::Delete { id } => {
            let session = storage
                .get(id)?
                .ok_or_else(|| FitTrackError::NotFound(format!("session {id}")))?;
            storage.delete(id)?;
            Ok(format!(
                "Deleted session {id}: {} on {}",
                session.plan_name.bold(),
                session.started_at_local().format("%Y-%m-%d %H:%M")
            ))
        }

        HistoryCommands::Clear { force } => {
            if !force {
                return Err(FitTrackError::InvalidInput(
                    "this deletes all session history; pass --force to confirm".to_string(),
                ));
            }

            let removed = storage.clear()?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({ "deleted": removed })),
                OutputFormat::Pretty => Ok(format!("{} {removed} sessions", "Deleted".red())),
            }
        }

        HistoryCommands::Report { period } => {
            let report = HistoryReport::generate(storage, period, Local::now())?;
            format_report(&report, format)
        }
    }
}
