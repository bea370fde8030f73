//! Finished-session record.

use chrono::{DateTime, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one finished session, handed to the history store.
///
/// The plan name is a snapshot: it stays as it was even if the plan is
/// renamed or deleted later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Plan the session ran
    pub plan_id: i64,
    /// Plan name when the session ran
    pub plan_name: String,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session finished or was stopped
    pub ended_at: DateTime<Utc>,
    /// Elapsed wall-clock seconds, rounded to the nearest second
    pub duration_seconds: i64,
}

impl SessionSummary {
    /// Build a summary, clamping `ended_at` so it never precedes `started_at`.
    ///
    /// Both instants are truncated to whole milliseconds, the precision history keeps.
    #[must_use]
    pub fn new(
        plan_id: i64,
        plan_name: impl Into<String>,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        let started_at = started_at.trunc_subsecs(3);
        let ended_at = ended_at.trunc_subsecs(3).max(started_at);
        Self {
            id: None,
            plan_id,
            plan_name: plan_name.into(),
            started_at,
            ended_at,
            duration_seconds: rounded_seconds(started_at, ended_at),
        }
    }

    /// Get start time in local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.started_at.with_timezone(&Local)
    }

    /// Get end time in local timezone.
    #[must_use]
    pub fn ended_at_local(&self) -> DateTime<Local> {
        self.ended_at.with_timezone(&Local)
    }
}

/// Whole seconds between two instants, half a second rounding up.
#[must_use]
pub fn rounded_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = end.signed_duration_since(start).num_milliseconds().max(0);
    (millis + 500) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_rounded_seconds() {
        let start = Utc::now();
        assert_eq!(rounded_seconds(start, start), 0);
        assert_eq!(rounded_seconds(start, start + Duration::milliseconds(499)), 0);
        assert_eq!(rounded_seconds(start, start + Duration::milliseconds(500)), 1);
        assert_eq!(rounded_seconds(start, start + Duration::milliseconds(70_400)), 70);
    }

    #[test]
    fn test_times_truncated_to_millis() {
        let start = Utc::now().trunc_subsecs(3) + Duration::microseconds(900);
        let summary = SessionSummary::new(1, "Monday", start, start + Duration::microseconds(1_499_900));

        assert_eq!(summary.started_at.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(summary.ended_at.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(
            summary.duration_seconds,
            rounded_seconds(summary.started_at, summary.ended_at)
        );
        assert_eq!(summary.duration_seconds, 2);
    }

    #[test]
    fn test_end_never_precedes_start() {
        let start = Utc::now();
        let summary = SessionSummary::new(1, "Monday", start, start - Duration::seconds(5));

        assert_eq!(summary.ended_at, summary.started_at);
        assert_eq!(summary.duration_seconds, 0);
    }
}
