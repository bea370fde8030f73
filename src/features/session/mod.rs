//! Workout sessions.
//!
//! Runs a plan as a timed session:
//! - Work and rest phases with a one-second countdown
//! - Pause, resume, skip and stop controls
//! - A summary handed to history when the session ends

pub mod clock;
pub mod controller;
pub mod metronome;
pub mod policy;
pub mod state;
pub mod summary;
pub mod timer;

#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use controller::SessionController;
pub use metronome::{Metronome, TICK_PERIOD};
pub use policy::DEFAULT_REST_SECONDS;
pub use state::{Phase, SessionState};
pub use summary::SessionSummary;
pub use timer::{SessionTimer, TimerOptions};
