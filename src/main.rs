use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fittrack::cli::args::{Cli, Commands, SessionCommands};
use fittrack::cli::commands;
use fittrack::config::{Config, Paths};
use fittrack::error::FitTrackError;
use fittrack::features::history::HistoryStorage;
use fittrack::features::plans::PlanStorage;
use fittrack::storage::Database;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        let code = e.downcast_ref::<FitTrackError>().map_or(1, FitTrackError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // No log output while the full-screen session owns the terminal
    let full_screen = matches!(
        cli.command,
        Commands::Session(ref args) if matches!(args.command, SessionCommands::Run { headless: false, .. })
    );
    if !full_screen {
        init_logging(cli.verbose);
    }

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let paths = Paths::resolve(cli.home)?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let db = Database::open_at(&paths.database)
        .with_context(|| format!("failed to open {}", paths.database.display()))?;
    let db = Rc::new(db);
    let plans = PlanStorage::new(Rc::clone(&db));
    let history = HistoryStorage::new(db);

    tracing::debug!(root = %paths.root.display(), "app.started");

    let output = match cli.command {
        Commands::Plan(args) => commands::plan(&plans, args.command, &config, format)?,
        Commands::Session(args) => commands::session(&plans, &history, args.command, &config, format)?,
        Commands::History(args) => commands::history(&history, args.command, &config, format)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
