//! Full-screen workout session.
//!
//! Renders the live countdown and forwards key presses to the session.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::Action;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::FitTrackError;
use crate::features::plans::WorkoutPlan;
use crate::features::session::{SessionController, SessionSummary};

/// Longest wait for input while no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Run the session screen until the user quits.
///
/// Returns the summary if a session was finished or stopped.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or draw.
pub fn run(controller: SessionController, plan: WorkoutPlan) -> Result<Option<SessionSummary>, FitTrackError> {
    enable_raw_mode().map_err(|e| FitTrackError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FitTrackError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FitTrackError::Terminal(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(controller, plan);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.summary().cloned())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), FitTrackError> {
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FitTrackError::Terminal(format!("Failed to draw: {e}")))?;

        let now = Instant::now();
        if app.metronome.is_due(now) {
            app.tick();
            continue;
        }

        let timeout = app
            .metronome
            .time_until(now)
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL));

        if let Some(action) = event::next_action(timeout)? {
            app.apply(action, Instant::now())?;
        }
    }

    Ok(())
}
