//! Session command implementation.
//!
//! Runs a plan either on the full-screen countdown or headless, where every
//! phase runs out on its own and each new phase is printed as it starts.

use std::io::Write;
use std::time::Instant;

use colored::Colorize;

use crate::cli::args::{OutputFormat, SessionCommands};
use crate::config::Config;
use crate::error::FitTrackError;
use crate::features::history::HistoryStorage;
use crate::features::plans::PlanStorage;
use crate::features::session::{Metronome, SessionController, SessionSummary, TimerOptions};
use crate::output::{format_state_line, format_summary};

/// Execute session subcommands.
///
/// # Errors
///
/// Returns an error if the plan does not exist, the terminal cannot be
/// used, or output cannot be written.
pub fn session(
    plans: &PlanStorage,
    history: &HistoryStorage,
    cmd: SessionCommands,
    config: &Config,
    format: OutputFormat,
) -> Result<String, FitTrackError> {
    let options = TimerOptions {
        default_rest_seconds: config.session.default_rest_seconds,
    };
    let mut controller = SessionController::new(plans.clone(), history.clone(), options);

    match cmd {
        SessionCommands::Run { plan_id, headless } => {
            let summary = if headless {
                let print = format == OutputFormat::Pretty;
                let mut stdout = std::io::stdout().lock();
                let mut sink = std::io::sink();
                let out: &mut dyn Write = if print { &mut stdout } else { &mut sink };
                run_headless(&mut controller, plan_id, config.session.headless_print_ticks, out)?
            } else {
                let plan = plans
                    .get(plan_id)?
                    .ok_or_else(|| FitTrackError::NotFound(format!("workout plan {plan_id}")))?;
                crate::tui::run(controller, plan)?
            };

            match summary {
                Some(summary) => format_summary(&summary, format),
                None => Ok(match format {
                    OutputFormat::Json => "null".to_string(),
                    OutputFormat::Pretty => "No session recorded".dimmed().to_string(),
                }),
            }
        }
    }
}

/// Run a session to completion in real time without user input.
///
/// Writes one line per phase, or one per second when `print_ticks` is set.
/// Returns the summary of the finished session.
///
/// # Errors
///
/// Returns an error if the plan does not exist or `out` cannot be written.
pub fn run_headless(
    controller: &mut SessionController,
    plan_id: i64,
    print_ticks: bool,
    out: &mut dyn Write,
) -> Result<Option<SessionSummary>, FitTrackError> {
    let mut receiver = controller.start_session(plan_id)?;
    let mut metronome = Metronome::default();

    let state = receiver.borrow_and_update().clone();
    writeln!(out, "{}", format_state_line(&state))?;
    metronome.reset(state.is_running, Instant::now());

    while let Some(wait) = metronome.time_until(Instant::now()) {
        std::thread::sleep(wait);

        let phase_ended = controller.tick();
        metronome.advance();

        let state = receiver.borrow_and_update().clone();
        if phase_ended || print_ticks {
            writeln!(out, "{}", format_state_line(&state))?;
        }
        if !state.is_running {
            metronome.disarm();
        }
    }

    tracing::debug!(plan_id, "session.headless_done");
    Ok(controller.last_summary().cloned())
}
