//! Application state for the session screen.

use std::time::Instant;

use tokio::sync::watch;

use crate::error::FitTrackError;
use crate::features::plans::WorkoutPlan;
use crate::features::session::{Metronome, SessionController, SessionState, SessionSummary};
use crate::tui::event::Action;

/// Application state.
pub struct App {
    controller: SessionController,
    /// Plan being run.
    pub plan: WorkoutPlan,
    receiver: Option<watch::Receiver<SessionState>>,
    /// Tick deadline for the live countdown.
    pub metronome: Metronome,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create the screen for a plan; the session starts on [`Action::Start`].
    #[must_use]
    pub fn new(controller: SessionController, plan: WorkoutPlan) -> Self {
        Self {
            controller,
            plan,
            receiver: None,
            metronome: Metronome::default(),
            status: Some("Press space to start".to_string()),
            should_quit: false,
        }
    }

    /// Latest published session state, or an idle one before the start.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.receiver
            .as_ref()
            .map(|rx| rx.borrow().clone())
            .unwrap_or_default()
    }

    /// Summary of the session once it has finished.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.controller.last_summary()
    }

    /// Apply a keyboard command.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan can no longer be loaded when starting.
    pub fn apply(&mut self, action: Action, now: Instant) -> Result<(), FitTrackError> {
        match action {
            Action::Start => {
                if self.receiver.is_some() {
                    return Ok(());
                }
                self.receiver = Some(self.controller.start_session(self.plan.id)?);
                self.status = None;
            }
            Action::TogglePause => {
                self.controller.toggle_pause();
                self.status = self
                    .state()
                    .is_paused()
                    .then(|| "Paused, press p to resume".to_string());
            }
            Action::Skip => {
                self.controller.skip();
                self.status = None;
            }
            Action::Stop => {
                if self.receiver.is_some() && !self.state().is_finished() {
                    self.controller.stop();
                } else {
                    self.should_quit = true;
                }
            }
            Action::Quit => {
                if !self.state().is_finished() {
                    self.controller.stop();
                }
                self.should_quit = true;
            }
        }

        self.metronome.reset(self.state().is_running, now);
        self.update_finished_status();
        Ok(())
    }

    /// Deliver a due tick to the session.
    pub fn tick(&mut self) {
        self.controller.tick();
        if self.state().is_running {
            self.metronome.advance();
        } else {
            self.metronome.disarm();
        }
        self.update_finished_status();
    }

    fn update_finished_status(&mut self) {
        if self.state().is_finished() && !self.should_quit {
            self.status = Some("Session saved, press q to quit".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::history::HistoryStorage;
    use crate::features::plans::{Exercise, PlanStorage};
    use crate::features::session::{ManualClock, Phase, TimerOptions};
    use crate::storage::Database;
    use chrono::Utc;
    use std::rc::Rc;
    use std::time::Duration;

    fn create_app(exercises: &[Exercise]) -> (App, HistoryStorage) {
        let db = Rc::new(Database::open_in_memory().unwrap());
        let plans = PlanStorage::new(Rc::clone(&db));
        let history = HistoryStorage::new(db);
        let plan = plans.create("Screen", exercises).unwrap();
        let controller = SessionController::new(plans, history.clone(), TimerOptions::default())
            .with_clock(Rc::new(ManualClock::new(Utc::now())));
        (App::new(controller, plan), history)
    }

    #[test]
    fn test_idle_until_started() {
        let (mut app, _) = create_app(&[Exercise::new("Squats", 2, 10, 5)]);
        let now = Instant::now();

        assert_eq!(app.state().phase, Phase::Idle);
        assert!(!app.metronome.is_armed());

        app.apply(Action::Start, now).unwrap();
        assert_eq!(app.state().phase, Phase::Working);
        assert!(app.metronome.is_armed());
        assert!(app.metronome.is_due(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_pause_disarms_and_resume_rearms() {
        let (mut app, _) = create_app(&[Exercise::new("Squats", 2, 10, 5)]);
        let now = Instant::now();
        app.apply(Action::Start, now).unwrap();

        app.apply(Action::TogglePause, now).unwrap();
        assert!(app.state().is_paused());
        assert!(!app.metronome.is_armed());
        assert!(app.status.is_some());

        let later = now + Duration::from_millis(400);
        app.apply(Action::TogglePause, later).unwrap();
        assert!(app.state().is_running);
        assert!(!app.metronome.is_due(now + Duration::from_secs(1)));
        assert!(app.metronome.is_due(later + Duration::from_secs(1)));
    }

    #[test]
    fn test_ticks_run_session_to_completion() {
        let (mut app, history) = create_app(&[Exercise::new("Plank", 1, 0, 3)]);
        app.apply(Action::Start, Instant::now()).unwrap();

        for _ in 0..3 {
            app.tick();
        }

        assert!(app.state().is_finished());
        assert!(!app.metronome.is_armed());
        assert!(app.summary().is_some());
        assert_eq!(history.list(10).unwrap().len(), 1);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_stop_saves_then_second_stop_quits() {
        let (mut app, history) = create_app(&[Exercise::new("Squats", 3, 10, 30)]);
        let now = Instant::now();
        app.apply(Action::Start, now).unwrap();

        app.apply(Action::Stop, now).unwrap();
        assert!(app.state().is_finished());
        assert!(!app.should_quit);
        assert_eq!(history.list(10).unwrap().len(), 1);

        app.apply(Action::Stop, now).unwrap();
        assert!(app.should_quit);
        assert_eq!(history.list(10).unwrap().len(), 1);
    }

    #[test]
    fn test_stop_before_start_quits_without_record() {
        let (mut app, history) = create_app(&[Exercise::new("Squats", 3, 10, 30)]);
        app.apply(Action::Stop, Instant::now()).unwrap();

        assert!(app.should_quit);
        assert!(history.list(10).unwrap().is_empty());
    }
}
