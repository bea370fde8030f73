//! Published session state.

use serde::{Deserialize, Serialize};

/// Phase of a workout session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Created, not started yet
    #[default]
    Idle,
    /// Performing a set
    Working,
    /// Resting between sets or exercises
    Resting,
    /// Completed, stopped or abandoned
    Finished,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Working => "Work",
            Self::Resting => "Rest",
            Self::Finished => "Finished",
        }
    }

    /// Whether this phase has a countdown.
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        matches!(self, Self::Working | Self::Resting)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Snapshot of a running session, published after every transition and tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current phase
    pub phase: Phase,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// True while the countdown is actively running
    pub is_running: bool,
    /// Exercise in focus; during rest, the exercise whose set just ended
    pub exercise_name: Option<String>,
    /// Position of the exercise in focus within the plan
    pub exercise_index: usize,
    /// Set number of the exercise in focus, starting at 1
    pub current_set: u32,
    /// Sets of the exercise in focus not yet finished
    pub sets_remaining: u32,
}

impl SessionState {
    /// Paused means a timed phase whose countdown is halted.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.phase.is_timed() && !self.is_running
    }

    /// Check if the session has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state = SessionState::default();
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.is_running);
        assert!(!state.is_paused());
        assert!(!state.is_finished());
    }

    #[test]
    fn test_is_paused() {
        let state = SessionState {
            phase: Phase::Resting,
            remaining_seconds: 12,
            ..SessionState::default()
        };
        assert!(state.is_paused());
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        let json = serde_json::to_string(&Phase::Resting).unwrap();
        assert_eq!(json, "\"resting\"");
    }
}
