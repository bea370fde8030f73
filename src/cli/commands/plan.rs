//! Plan command implementation.

use colored::Colorize;

use crate::cli::args::{AddExerciseArgs, OutputFormat, PlanCommands};
use crate::config::Config;
use crate::error::FitTrackError;
use crate::features::plans::{Exercise, PlanStorage};
use crate::output::{format_plan, format_plans, to_json};

/// Execute plan subcommands.
///
/// # Errors
///
/// Returns an error if the input is invalid, the plan does not exist, or
/// the database operation fails.
pub fn plan(
    storage: &PlanStorage,
    cmd: PlanCommands,
    config: &Config,
    format: OutputFormat,
) -> Result<String, FitTrackError> {
    let default_rest = config.session.default_rest_seconds;

    match cmd {
        PlanCommands::Create { name, exercises } => {
            let plan = storage.create(&name, &exercises)?;
            match format {
                OutputFormat::Json => to_json(&plan),
                OutputFormat::Pretty => Ok(format!(
                    "{} {} (ID: {}, {} exercises)",
                    "Created plan:".green(),
                    plan.name.bold(),
                    plan.id,
                    plan.exercises.len()
                )),
            }
        }

        PlanCommands::AddExercise(args) => add_exercise(storage, args, format),

        PlanCommands::RemoveExercise { id } => {
            if !storage.remove_exercise(id)? {
                return Err(FitTrackError::NotFound(format!("exercise {id}")));
            }
            Ok(format!("Removed exercise: {id}"))
        }

        PlanCommands::List => format_plans(&storage.list()?, format),

        PlanCommands::Show { id } => {
            let plan = storage
                .get(id)?
                .ok_or_else(|| FitTrackError::NotFound(format!("workout plan {id}")))?;
            format_plan(&plan, default_rest, format)
        }

        PlanCommands::Rename { id, name } => {
            if !storage.rename(id, &name)? {
                return Err(FitTrackError::NotFound(format!("workout plan {id}")));
            }
            Ok(format!("Renamed plan {id} to {}", name.trim().bold()))
        }

        PlanCommands::Delete { id } => {
            if !storage.delete(id)? {
                return Err(FitTrackError::NotFound(format!("workout plan {id}")));
            }
            Ok(format!("Deleted plan: {id}"))
        }
    }
}

fn add_exercise(
    storage: &PlanStorage,
    args: AddExerciseArgs,
    format: OutputFormat,
) -> Result<String, FitTrackError> {
    let mut exercise = Exercise::new(args.name, args.sets, args.reps, args.work_seconds);
    exercise.rest_seconds = args.rest_seconds;

    let added = storage.add_exercise(args.plan_id, &exercise)?;

    match format {
        OutputFormat::Json => to_json(&added),
        OutputFormat::Pretty => Ok(format!(
            "{} {} to plan {} (ID: {})",
            "Added exercise:".green(),
            added.name.bold(),
            args.plan_id,
            added.id.unwrap_or_default()
        )),
    }
}
