//! Session controller.
//!
//! Owns the one live [`SessionTimer`], loads plans for it, and saves finished
//! sessions to history.

use std::rc::Rc;

use tokio::sync::watch;

use super::clock::{Clock, SystemClock};
use super::state::SessionState;
use super::summary::SessionSummary;
use super::timer::{SessionTimer, TimerOptions};
use crate::error::FitTrackError;
use crate::features::history::HistoryStorage;
use crate::features::plans::PlanStorage;

/// Runs workout sessions against the plan and history stores.
pub struct SessionController {
    plans: PlanStorage,
    history: HistoryStorage,
    options: TimerOptions,
    clock: Rc<dyn Clock>,
    active: Option<SessionTimer>,
}

impl SessionController {
    /// Create a controller with no live session.
    #[must_use]
    pub fn new(plans: PlanStorage, history: HistoryStorage, options: TimerOptions) -> Self {
        Self {
            plans,
            history,
            options,
            clock: Rc::new(SystemClock),
            active: None,
        }
    }

    /// Use a different clock for the sessions this controller starts.
    #[must_use]
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Load a plan and start a session for it.
    ///
    /// A session that is still live is abandoned first and not recorded.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the plan does not exist, or a database error if
    /// it cannot be loaded.
    pub fn start_session(&mut self, plan_id: i64) -> Result<watch::Receiver<SessionState>, FitTrackError> {
        let plan = self
            .plans
            .get(plan_id)?
            .ok_or_else(|| FitTrackError::NotFound(format!("workout plan {plan_id}")))?;

        if let Some(mut previous) = self.active.take() {
            previous.abandon();
        }

        let mut timer = SessionTimer::new(plan, self.options).with_clock(Rc::clone(&self.clock));
        let history = self.history.clone();
        timer.on_finish(move |summary| match history.record(&summary) {
            Ok(id) => tracing::info!(id, plan_id = summary.plan_id, "history.recorded"),
            Err(e) => tracing::error!(error = %e, plan_id = summary.plan_id, "history.record_failed"),
        });

        let receiver = timer.subscribe();
        timer.start();
        self.active = Some(timer);

        Ok(receiver)
    }

    /// Pause the live session.
    pub fn pause(&mut self) {
        if let Some(timer) = self.active.as_mut() {
            timer.pause();
        }
    }

    /// Resume the live session.
    pub fn resume(&mut self) {
        if let Some(timer) = self.active.as_mut() {
            timer.resume();
        }
    }

    /// Pause if counting down, resume if paused.
    pub fn toggle_pause(&mut self) {
        if let Some(timer) = self.active.as_mut() {
            if timer.state().is_running {
                timer.pause();
            } else {
                timer.resume();
            }
        }
    }

    /// Skip the current phase of the live session.
    pub fn skip(&mut self) {
        if let Some(timer) = self.active.as_mut() {
            timer.skip();
        }
    }

    /// Stop the live session and record it.
    pub fn stop(&mut self) {
        if let Some(timer) = self.active.as_mut() {
            timer.stop_and_finish();
        }
    }

    /// Deliver one countdown tick. Returns `true` if a phase ended.
    pub fn tick(&mut self) -> bool {
        self.active.as_mut().is_some_and(SessionTimer::tick)
    }

    /// Latest state of the live session.
    #[must_use]
    pub fn state(&self) -> Option<&SessionState> {
        self.active.as_ref().map(SessionTimer::state)
    }

    /// Summary of the live session once it has finished.
    #[must_use]
    pub fn last_summary(&self) -> Option<&SessionSummary> {
        self.active.as_ref().and_then(SessionTimer::summary)
    }
}
