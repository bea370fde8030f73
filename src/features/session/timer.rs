//! Workout session timer.
//!
//! Walks a plan's exercises set by set, alternating work and rest phases with
//! a one-second countdown, and produces a [`SessionSummary`] when the plan is
//! completed or the session is stopped.
//!
//! The timer does not schedule its own ticks. Whoever owns it calls
//! [`SessionTimer::tick`] once per elapsed second (see
//! [`Metronome`](super::Metronome)). A phase reaching zero starts the next one
//! within the same call, so a session left alone runs to completion.
//!
//! Calls that make no sense in the current state are ignored.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::clock::{Clock, SystemClock};
use super::policy::{self, DEFAULT_REST_SECONDS};
use super::state::{Phase, SessionState};
use super::summary::SessionSummary;
use crate::features::plans::{Exercise, WorkoutPlan};

/// Tunables for a session timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerOptions {
    /// Rest used for exercises without a rest time of their own.
    pub default_rest_seconds: u32,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            default_rest_seconds: DEFAULT_REST_SECONDS,
        }
    }
}

/// Callback receiving the summary of a finished session.
pub type FinishCallback = Box<dyn FnOnce(SessionSummary)>;

/// Next step of the phase chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Begin the work phase for the current exercise and set
    Work,
    /// Decide between a rest phase and finishing
    Rest,
    /// Move to the next set, then work
    NextSet,
    /// Produce the summary and stop
    Finish,
    /// A countdown is running; wait for ticks
    Wait,
}

/// State machine for one workout session.
pub struct SessionTimer {
    plan_id: i64,
    plan_name: String,
    exercises: Vec<Exercise>,
    options: TimerOptions,
    clock: Rc<dyn Clock>,

    exercise_index: usize,
    current_set: u32,
    resting: bool,
    state: SessionState,

    started_at: Option<DateTime<Utc>>,
    finalized: bool,
    summary: Option<SessionSummary>,

    publisher: watch::Sender<SessionState>,
    on_finish: Option<FinishCallback>,
}

impl SessionTimer {
    /// Create an idle timer over a snapshot of `plan`.
    #[must_use]
    pub fn new(plan: WorkoutPlan, options: TimerOptions) -> Self {
        let (publisher, _) = watch::channel(SessionState::default());
        Self {
            plan_id: plan.id,
            plan_name: plan.name,
            exercises: plan.exercises,
            options,
            clock: Rc::new(SystemClock),
            exercise_index: 0,
            current_set: 1,
            resting: false,
            state: SessionState::default(),
            started_at: None,
            finalized: false,
            summary: None,
            publisher,
            on_finish: None,
        }
    }

    /// Use a different clock for session timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register the callback invoked once with the session summary.
    pub fn on_finish(&mut self, callback: impl FnOnce(SessionSummary) + 'static) {
        self.on_finish = Some(Box::new(callback));
    }

    /// Observe the published state. New receivers see the latest state only.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.publisher.subscribe()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Summary of the session once it has been finalized.
    #[must_use]
    pub const fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// When the session started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Begin the first work phase.
    ///
    /// An empty plan goes straight to `finished` without a summary.
    pub fn start(&mut self) {
        if self.state.phase != Phase::Idle {
            tracing::debug!(phase = %self.state.phase, "session.start_ignored");
            return;
        }

        if self.exercises.is_empty() {
            tracing::info!(plan_id = self.plan_id, "session.empty_plan");
            self.state = SessionState {
                phase: Phase::Finished,
                ..SessionState::default()
            };
            self.publish();
            return;
        }

        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
        tracing::info!(plan_id = self.plan_id, plan = %self.plan_name, "session.started");

        self.exercise_index = 0;
        self.current_set = 1;
        self.run(Step::Work);
    }

    /// Halt the countdown, keeping phase and remaining time.
    pub fn pause(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        tracing::debug!(remaining = self.state.remaining_seconds, "session.paused");
        self.publish();
    }

    /// Continue a paused countdown from where it stopped.
    pub fn resume(&mut self) {
        if !self.state.is_paused() {
            return;
        }
        self.state.is_running = true;
        tracing::debug!(remaining = self.state.remaining_seconds, "session.resumed");
        self.publish();
    }

    /// End the current phase now and move on.
    ///
    /// Skipping behaves exactly like the phase running out: a finished rest
    /// moves to the next set, a finished set goes to the rest decision. The
    /// following phase starts counting even if the timer was paused.
    pub fn skip(&mut self) {
        if !self.state.phase.is_timed() {
            return;
        }
        tracing::debug!(phase = %self.state.phase, "session.skipped");
        self.complete_phase();
    }

    /// Count down one second.
    ///
    /// Returns `true` if this tick ended the current phase.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running {
            return false;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
        self.publish();

        if self.state.remaining_seconds == 0 {
            self.complete_phase();
            true
        } else {
            false
        }
    }

    /// Stop wherever the session is and emit its summary.
    ///
    /// Works from any state. A session that never started yields a zero-length
    /// summary. Only the first finalization produces a summary.
    pub fn stop_and_finish(&mut self) {
        if self.finalized {
            return;
        }
        self.finalize();
    }

    /// Finish without a summary. Used when another session replaces this one.
    pub fn abandon(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        self.state = SessionState {
            phase: Phase::Finished,
            ..SessionState::default()
        };
        self.on_finish = None;
        tracing::info!(plan_id = self.plan_id, "session.abandoned");
        self.publish();
    }

    fn complete_phase(&mut self) {
        if self.resting {
            self.run(Step::NextSet);
        } else {
            self.run(Step::Rest);
        }
    }

    fn run(&mut self, mut step: Step) {
        loop {
            step = match step {
                Step::Work => self.enter_work(),
                Step::Rest => self.enter_rest(),
                Step::NextSet => {
                    self.current_set += 1;
                    Step::Work
                }
                Step::Finish => {
                    self.finalize();
                    return;
                }
                Step::Wait => return,
            };
        }
    }

    fn enter_work(&mut self) -> Step {
        let Some(exercise) = self.exercises.get(self.exercise_index) else {
            return Step::Finish;
        };

        if self.current_set > exercise.sets {
            self.exercise_index += 1;
            self.current_set = 1;
            return Step::Work;
        }

        self.resting = false;
        self.state = SessionState {
            phase: Phase::Working,
            remaining_seconds: exercise.work_seconds,
            is_running: true,
            exercise_name: Some(exercise.name.clone()),
            exercise_index: self.exercise_index,
            current_set: self.current_set,
            sets_remaining: policy::sets_remaining(exercise, self.current_set),
        };
        tracing::debug!(
            exercise = %exercise.name,
            set = self.current_set,
            seconds = exercise.work_seconds,
            "session.work_phase"
        );
        self.publish();

        if exercise.work_seconds == 0 {
            Step::Rest
        } else {
            Step::Wait
        }
    }

    fn enter_rest(&mut self) -> Step {
        if policy::skips_rest(self.exercise_index, self.current_set, &self.exercises) {
            return Step::Finish;
        }
        let Some(exercise) = self.exercises.get(self.exercise_index) else {
            return Step::Finish;
        };

        let rest = policy::rest_duration(exercise, self.options.default_rest_seconds);
        self.resting = true;
        self.state = SessionState {
            phase: Phase::Resting,
            remaining_seconds: rest,
            is_running: true,
            exercise_name: Some(exercise.name.clone()),
            exercise_index: self.exercise_index,
            current_set: self.current_set,
            sets_remaining: policy::sets_remaining(exercise, self.current_set + 1),
        };
        tracing::debug!(exercise = %exercise.name, seconds = rest, "session.rest_phase");
        self.publish();

        if rest == 0 {
            Step::NextSet
        } else {
            Step::Wait
        }
    }

    fn finalize(&mut self) {
        self.finalized = true;

        let ended_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(ended_at);
        let summary = SessionSummary::new(self.plan_id, self.plan_name.clone(), started_at, ended_at);

        self.state = SessionState {
            phase: Phase::Finished,
            ..SessionState::default()
        };
        tracing::info!(
            plan_id = self.plan_id,
            duration_seconds = summary.duration_seconds,
            "session.finished"
        );
        self.publish();

        self.summary = Some(summary.clone());
        if let Some(callback) = self.on_finish.take() {
            callback(summary);
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session::clock::ManualClock;
    use chrono::{Duration, SubsecRound};
    use std::cell::RefCell;

    fn plan(exercises: Vec<Exercise>) -> WorkoutPlan {
        WorkoutPlan {
            id: 7,
            name: "Monday".to_string(),
            created_at: Utc::now(),
            exercises,
        }
    }

    fn timer_with_clock(exercises: Vec<Exercise>) -> (SessionTimer, ManualClock) {
        let clock = ManualClock::new(Utc::now().trunc_subsecs(3));
        let timer =
            SessionTimer::new(plan(exercises), TimerOptions::default()).with_clock(Rc::new(clock.clone()));
        (timer, clock)
    }

    /// Tick until finished, recording each phase entered with its length.
    fn run_to_end(timer: &mut SessionTimer, clock: &ManualClock) -> Vec<(Phase, u32)> {
        let mut phases = vec![(timer.state().phase, timer.state().remaining_seconds)];
        for _ in 0..100_000 {
            if timer.state().is_finished() {
                break;
            }
            clock.advance(Duration::seconds(1));
            if timer.tick() {
                phases.push((timer.state().phase, timer.state().remaining_seconds));
            }
        }
        phases
    }

    #[test]
    fn test_new_timer_is_idle() {
        let (timer, _) = timer_with_clock(vec![Exercise::new("Squats", 1, 10, 5)]);
        assert_eq!(timer.state(), &SessionState::default());
        assert!(timer.started_at().is_none());
        assert!(timer.summary().is_none());
    }

    #[test]
    fn test_two_set_scenario() {
        let (mut timer, clock) = timer_with_clock(vec![Exercise::new("Push ups", 2, 10, 30).with_rest(10)]);
        let summaries = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&summaries);
        timer.on_finish(move |summary| sink.borrow_mut().push(summary));

        timer.start();
        let phases = run_to_end(&mut timer, &clock);

        assert_eq!(
            phases,
            [
                (Phase::Working, 30),
                (Phase::Resting, 10),
                (Phase::Working, 30),
                (Phase::Finished, 0),
            ]
        );

        let summaries = summaries.borrow();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].duration_seconds, 70);
        assert_eq!(summaries[0].plan_id, 7);
        assert_eq!(summaries[0].plan_name, "Monday");
    }

    #[test]
    fn test_phase_counts_match_total_sets() {
        let exercises = vec![
            Exercise::new("Squats", 3, 10, 3).with_rest(2),
            Exercise::new("Lunges", 1, 10, 2),
            Exercise::new("Plank", 2, 0, 4).with_rest(1),
        ];
        let total_sets = 6;
        let (mut timer, clock) = timer_with_clock(exercises);

        timer.start();
        let phases = run_to_end(&mut timer, &clock);

        let work = phases.iter().filter(|(p, _)| *p == Phase::Working).count();
        let rest = phases.iter().filter(|(p, _)| *p == Phase::Resting).count();
        assert_eq!(work, total_sets);
        assert_eq!(rest, total_sets - 1);
        assert_eq!(phases.last().map(|(p, _)| *p), Some(Phase::Finished));
    }

    #[test]
    fn test_default_rest_applies() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Lunges", 2, 10, 1)]);
        timer.start();
        timer.tick();
        assert_eq!(timer.state().phase, Phase::Resting);
        assert_eq!(timer.state().remaining_seconds, 60);
    }

    #[test]
    fn test_configured_default_rest() {
        let options = TimerOptions {
            default_rest_seconds: 15,
        };
        let mut timer = SessionTimer::new(plan(vec![Exercise::new("Lunges", 2, 10, 1)]), options);
        timer.start();
        timer.tick();
        assert_eq!(timer.state().remaining_seconds, 15);
    }

    #[test]
    fn test_rest_between_exercises_then_next_exercise() {
        let (mut timer, _) = timer_with_clock(vec![
            Exercise::new("Squats", 1, 10, 1).with_rest(3),
            Exercise::new("Plank", 2, 0, 5),
        ]);
        timer.start();
        timer.tick();

        assert_eq!(timer.state().phase, Phase::Resting);
        assert_eq!(timer.state().exercise_name.as_deref(), Some("Squats"));
        assert_eq!(timer.state().sets_remaining, 0);

        timer.skip();
        assert_eq!(timer.state().phase, Phase::Working);
        assert_eq!(timer.state().exercise_name.as_deref(), Some("Plank"));
        assert_eq!(timer.state().exercise_index, 1);
        assert_eq!(timer.state().current_set, 1);
        assert_eq!(timer.state().sets_remaining, 2);
    }

    #[test]
    fn test_start_sets_first_work_phase() {
        let (mut timer, clock) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 40)]);
        timer.start();

        let state = timer.state();
        assert_eq!(state.phase, Phase::Working);
        assert!(state.is_running);
        assert_eq!(state.remaining_seconds, 40);
        assert_eq!(state.exercise_name.as_deref(), Some("Squats"));
        assert_eq!(state.current_set, 1);
        assert_eq!(state.sets_remaining, 3);
        assert_eq!(timer.started_at(), Some(clock.now()));
    }

    #[test]
    fn test_start_twice_is_ignored() {
        let (mut timer, clock) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 40)]);
        timer.start();
        let started = timer.started_at();
        timer.tick();

        clock.advance(Duration::seconds(30));
        timer.start();

        assert_eq!(timer.started_at(), started);
        assert_eq!(timer.state().remaining_seconds, 39);
        assert!(!timer.state().is_finished());
    }

    #[test]
    fn test_empty_plan_finishes_immediately() {
        let (mut timer, _) = timer_with_clock(vec![]);
        let called = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&called);
        timer.on_finish(move |_| *flag.borrow_mut() = true);

        timer.start();

        assert_eq!(timer.state().phase, Phase::Finished);
        assert!(timer.started_at().is_none());
        assert!(!*called.borrow());
    }

    #[test]
    fn test_pause_resume_preserves_remaining() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 2, 10, 30)]);
        timer.start();
        for _ in 0..12 {
            timer.tick();
        }
        assert_eq!(timer.state().remaining_seconds, 18);

        timer.pause();
        assert!(timer.state().is_paused());
        for _ in 0..50 {
            assert!(!timer.tick());
        }
        assert_eq!(timer.state().remaining_seconds, 18);

        timer.pause();
        assert_eq!(timer.state().remaining_seconds, 18);

        timer.resume();
        assert!(timer.state().is_running);
        assert_eq!(timer.state().remaining_seconds, 18);
        timer.tick();
        assert_eq!(timer.state().remaining_seconds, 17);
    }

    #[test]
    fn test_misuse_is_ignored() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 2, 10, 30)]);

        timer.pause();
        timer.resume();
        timer.skip();
        assert!(!timer.tick());
        assert_eq!(timer.state(), &SessionState::default());

        timer.start();
        timer.resume();
        assert!(timer.state().is_running);
        assert_eq!(timer.state().remaining_seconds, 30);
    }

    #[test]
    fn test_skip_work_with_sets_left_goes_to_rest() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 30).with_rest(20)]);
        timer.start();
        timer.tick();

        timer.skip();

        assert_eq!(timer.state().phase, Phase::Resting);
        assert_eq!(timer.state().remaining_seconds, 20);
        assert_eq!(timer.state().sets_remaining, 2);
    }

    #[test]
    fn test_skip_rest_advances_set() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 30).with_rest(20)]);
        timer.start();
        timer.skip();
        timer.skip();

        assert_eq!(timer.state().phase, Phase::Working);
        assert_eq!(timer.state().current_set, 2);
        assert_eq!(timer.state().remaining_seconds, 30);
    }

    #[test]
    fn test_skip_last_set_finishes() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 1, 10, 30)]);
        let summaries = Rc::new(RefCell::new(0));
        let count = Rc::clone(&summaries);
        timer.on_finish(move |_| *count.borrow_mut() += 1);

        timer.start();
        timer.skip();

        assert_eq!(timer.state().phase, Phase::Finished);
        assert_eq!(*summaries.borrow(), 1);

        timer.skip();
        timer.stop_and_finish();
        assert_eq!(*summaries.borrow(), 1);
    }

    #[test]
    fn test_skip_while_paused_starts_next_phase() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 2, 10, 30).with_rest(20)]);
        timer.start();
        timer.pause();

        timer.skip();

        assert_eq!(timer.state().phase, Phase::Resting);
        assert!(timer.state().is_running);
    }

    #[test]
    fn test_skip_matches_natural_expiry() {
        let exercises = vec![
            Exercise::new("Squats", 2, 10, 2).with_rest(1),
            Exercise::new("Plank", 1, 0, 2),
        ];
        let (mut ticked, _) = timer_with_clock(exercises.clone());
        let (mut skipped, _) = timer_with_clock(exercises);
        ticked.start();
        skipped.start();

        while !ticked.state().is_finished() {
            let before = ticked.state().clone();
            while !ticked.tick() {}
            skipped.skip();
            assert_eq!(ticked.state(), skipped.state(), "diverged after {before:?}");
        }
    }

    #[test]
    fn test_stop_and_finish_produces_one_summary() {
        let (mut timer, clock) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 30)]);
        let summaries = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&summaries);
        timer.on_finish(move |summary| sink.borrow_mut().push(summary));

        timer.start();
        clock.advance(Duration::milliseconds(45_600));
        timer.stop_and_finish();
        timer.stop_and_finish();

        let summaries = summaries.borrow();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert!(summary.ended_at >= summary.started_at);
        assert_eq!(summary.duration_seconds, 46);
        assert_eq!(timer.state().phase, Phase::Finished);
        assert!(!timer.state().is_running);
        assert_eq!(timer.summary(), Some(summary));
    }

    #[test]
    fn test_stop_from_idle_is_zero_length() {
        let (mut timer, clock) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 30)]);
        timer.stop_and_finish();

        let summary = timer.summary().unwrap();
        assert_eq!(summary.started_at, clock.now());
        assert_eq!(summary.ended_at, clock.now());
        assert_eq!(summary.duration_seconds, 0);
    }

    #[test]
    fn test_stop_after_empty_plan_start() {
        let (mut timer, _) = timer_with_clock(vec![]);
        timer.start();
        timer.stop_and_finish();
        assert_eq!(timer.summary().map(|s| s.duration_seconds), Some(0));
    }

    #[test]
    fn test_stop_halts_countdown() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 30)]);
        timer.start();
        timer.stop_and_finish();

        assert!(!timer.tick());
        timer.start();
        timer.resume();
        assert_eq!(timer.state().phase, Phase::Finished);
    }

    #[test]
    fn test_abandon_skips_callback() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 3, 10, 30)]);
        let called = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&called);
        timer.on_finish(move |_| *flag.borrow_mut() = true);

        timer.start();
        timer.abandon();
        timer.stop_and_finish();

        assert_eq!(timer.state().phase, Phase::Finished);
        assert!(timer.summary().is_none());
        assert!(!*called.borrow());
    }

    #[test]
    fn test_zero_length_phases_chain_through() {
        let (mut timer, _) = timer_with_clock(vec![
            Exercise::new("Warm up", 1, 0, 0).with_rest(0),
            Exercise::new("Squats", 1, 10, 5),
        ]);
        timer.start();

        assert_eq!(timer.state().phase, Phase::Working);
        assert_eq!(timer.state().exercise_name.as_deref(), Some("Squats"));
        assert_eq!(timer.state().remaining_seconds, 5);
    }

    #[test]
    fn test_all_zero_length_plan_finishes_on_start() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Nothing", 2, 0, 0).with_rest(0)]);
        timer.start();
        assert_eq!(timer.state().phase, Phase::Finished);
        assert!(timer.summary().is_some());
    }

    #[test]
    fn test_subscribers_see_latest_state() {
        let (mut timer, _) = timer_with_clock(vec![Exercise::new("Squats", 2, 10, 30)]);
        let early = timer.subscribe();

        timer.start();
        timer.tick();
        timer.tick();

        let late = timer.subscribe();
        assert_eq!(early.borrow().remaining_seconds, 28);
        assert_eq!(late.borrow().remaining_seconds, 28);
        assert_eq!(&*late.borrow(), timer.state());

        timer.stop_and_finish();
        assert!(early.borrow().is_finished());
    }
}
