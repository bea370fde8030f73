use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::history::ReportPeriod;
use crate::features::plans::Exercise;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Workout plans, timed sessions and history in your terminal")]
#[command(long_about = "fittrack - workout plans, timed sessions and history

Build workout plans from exercises, run them with a work/rest countdown,
and review the sessions you finished. Everything is stored in a local
SQLite database.

QUICK START:
  fittrack plan create \"Monday\" -e \"Push ups:3:10:30\" -e \"Plank:2:0:45:30\"
  fittrack plan list                  Show your plans
  fittrack session run 1              Run plan 1 with a live countdown
  fittrack history list               Show finished sessions

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  fittrack <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the `general.default_output` config setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the config file and database
    ///
    /// Defaults to ~/.fittrack.
    #[arg(long, env = "FITTRACK_HOME", global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create and edit workout plans
    ///
    /// A plan is a named, ordered list of exercises. Each exercise has a
    /// number of sets, reps, a work time and an optional rest time.
    ///
    /// # Subcommands
    ///
    ///   create           Create a plan, optionally with exercises
    ///   add-exercise     Append an exercise to a plan
    ///   remove-exercise  Remove an exercise by ID
    ///   list             List all plans
    ///   show             Show one plan with its exercises
    ///   rename           Rename a plan
    ///   delete           Delete a plan and its exercises
    ///
    /// # Examples
    ///
    ///   fittrack plan create "Legs" -e "Squats:4:12:40:60"
    ///   fittrack plan add-exercise 1 "Lunges" --sets 3 --reps 10 --time 30
    ///   fittrack plan show 1
    #[command(alias = "p")]
    Plan(PlanArgs),

    /// Run workout sessions
    ///
    /// Runs a plan set by set: each set is a work countdown followed by a
    /// rest countdown, except after the very last set.
    ///
    /// # Keys (interactive screen)
    ///
    ///   space  Start
    ///   p      Pause / resume
    ///   s      Skip the current phase
    ///   q      Stop and save the session
    ///
    /// # Examples
    ///
    ///   fittrack session run 1              Interactive countdown
    ///   fittrack session run 1 --headless   Print phases to stdout
    #[command(alias = "s")]
    Session(SessionArgs),

    /// Review finished sessions
    ///
    /// Every finished or stopped session is saved with the plan name it was
    /// run under, even if the plan is later renamed or deleted.
    ///
    /// # Examples
    ///
    ///   fittrack history list --limit 5
    ///   fittrack history list --plan 1
    ///   fittrack history report --period month
    ///   fittrack history clear --force
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the given shell.
    ///
    /// # Examples
    ///
    ///   fittrack completions bash > ~/.bash_completion.d/fittrack
    ///   fittrack completions zsh > ~/.zfunc/_fittrack
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommands,
}

/// Plan subcommands.
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    ///
    /// Exercises use the form name:sets:reps:time[:rest], times in seconds.
    /// Without a rest time the session default (60s) applies.
    ///
    /// Example: fittrack plan create "Monday" -e "Push ups:3:10:30:45"
    Create {
        /// Plan name
        name: String,

        /// Exercise as name:sets:reps:time[:rest] (repeatable)
        #[arg(short, long = "exercise", value_name = "SPEC")]
        exercises: Vec<Exercise>,
    },

    /// Append an exercise to a plan
    AddExercise(AddExerciseArgs),

    /// Remove an exercise by its ID
    RemoveExercise {
        /// Exercise ID (see `plan show`)
        id: i64,
    },

    /// List all plans
    #[command(alias = "ls")]
    List,

    /// Show a plan and its exercises
    Show {
        /// Plan ID
        id: i64,
    },

    /// Rename a plan
    ///
    /// Sessions already in history keep the old name.
    Rename {
        /// Plan ID
        id: i64,
        /// New name
        name: String,
    },

    /// Delete a plan and its exercises
    ///
    /// Sessions already in history are kept.
    #[command(alias = "rm")]
    Delete {
        /// Plan ID
        id: i64,
    },
}

#[derive(Args)]
pub struct AddExerciseArgs {
    /// Plan ID
    pub plan_id: i64,

    /// Exercise name
    pub name: String,

    /// Number of sets
    #[arg(long, default_value_t = 1)]
    pub sets: u32,

    /// Repetitions per set
    #[arg(long, default_value_t = 0)]
    pub reps: u32,

    /// Work time per set, in seconds
    #[arg(long = "time", value_name = "SECS")]
    pub work_seconds: u32,

    /// Rest after each set, in seconds
    #[arg(long = "rest", value_name = "SECS")]
    pub rest_seconds: Option<u32>,
}

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

/// Session subcommands.
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Run a plan
    ///
    /// Opens a full-screen countdown. With --headless the session runs to
    /// completion without input and prints each phase as it starts.
    Run {
        /// Plan ID
        plan_id: i64,

        /// Run without the interactive screen
        #[arg(long)]
        headless: bool,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List finished sessions, newest first
    #[command(alias = "ls")]
    List {
        /// Maximum number of sessions (default from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only sessions of this plan ID
        #[arg(short, long = "plan", value_name = "ID")]
        plan_id: Option<i64>,
    },

    /// Delete one session
    Delete {
        /// Session ID
        id: i64,
    },

    /// Delete all sessions
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Summarize sessions over a period
    Report {
        /// Period to report on
        #[arg(short, long, value_enum, default_value_t)]
        period: ReportPeriod,
    },
}
