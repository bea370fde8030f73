//! One-second tick scheduling for a session timer.
//!
//! The metronome only tracks when the next tick is due; the driver loop asks
//! it how long to wait and whether a tick has come due. Every control command
//! re-arms it from scratch so no earlier countdown keeps ticking.

use std::time::{Duration, Instant};

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Deadline tracker for the countdown tick.
#[derive(Debug, Clone)]
pub struct Metronome {
    period: Duration,
    next: Option<Instant>,
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Metronome {
    /// Create a disarmed metronome with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Schedule the next tick one period after `now`, dropping any pending one.
    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    /// Cancel the pending tick.
    pub fn disarm(&mut self) {
        self.next = None;
    }

    /// Re-arm after a command: armed while the countdown runs, idle otherwise.
    pub fn reset(&mut self, running: bool, now: Instant) {
        if running {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Whether a tick is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Whether the pending tick is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_some_and(|next| now >= next)
    }

    /// Move the deadline one period forward after a tick was delivered.
    pub fn advance(&mut self) {
        if let Some(next) = self.next {
            self.next = Some(next + self.period);
        }
    }

    /// How long to wait for the next tick, or `None` when disarmed.
    #[must_use]
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_disarmed() {
        let metronome = Metronome::default();
        let now = Instant::now();
        assert!(!metronome.is_armed());
        assert!(!metronome.is_due(now + Duration::from_secs(10)));
        assert_eq!(metronome.time_until(now), None);
    }

    #[test]
    fn test_due_after_one_period() {
        let mut metronome = Metronome::default();
        let now = Instant::now();
        metronome.arm(now);

        assert!(!metronome.is_due(now + Duration::from_millis(999)));
        assert!(metronome.is_due(now + Duration::from_secs(1)));
        assert_eq!(
            metronome.time_until(now + Duration::from_millis(250)),
            Some(Duration::from_millis(750))
        );
    }

    #[test]
    fn test_advance_keeps_cadence() {
        let mut metronome = Metronome::default();
        let now = Instant::now();
        metronome.arm(now);
        metronome.advance();

        assert!(!metronome.is_due(now + Duration::from_millis(1500)));
        assert!(metronome.is_due(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_rearm_drops_previous_deadline() {
        let mut metronome = Metronome::default();
        let now = Instant::now();
        metronome.arm(now);

        let later = now + Duration::from_millis(900);
        metronome.reset(true, later);

        assert!(!metronome.is_due(now + Duration::from_secs(1)));
        assert!(metronome.is_due(later + Duration::from_secs(1)));
    }

    #[test]
    fn test_reset_when_not_running_disarms() {
        let mut metronome = Metronome::default();
        let now = Instant::now();
        metronome.arm(now);
        metronome.reset(false, now);

        assert!(!metronome.is_armed());
        metronome.advance();
        assert!(!metronome.is_armed());
    }

    #[test]
    fn test_time_until_saturates() {
        let mut metronome = Metronome::default();
        let now = Instant::now();
        metronome.arm(now);
        assert_eq!(
            metronome.time_until(now + Duration::from_secs(5)),
            Some(Duration::ZERO)
        );
    }
}
