//! Workout history reports.
//!
//! Totals recorded sessions over a period of local calendar days.

use std::collections::HashMap;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use clap::ValueEnum;
use serde::Serialize;

use super::storage::HistoryStorage;
use crate::error::FitTrackError;
use crate::features::session::SessionSummary;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    #[default]
    Week,
    /// Last 30 days
    Month,
    /// Everything recorded
    All,
}

impl ReportPeriod {
    /// Start and end of this period, relative to `now`.
    ///
    /// Periods cover whole local days, ending at the start of tomorrow.
    #[must_use]
    pub fn range(self, now: DateTime<Local>) -> (DateTime<Utc>, DateTime<Utc>) {
        let today = now.date_naive();
        let end = today
            .checked_add_days(Days::new(1))
            .map_or_else(|| now.with_timezone(&Utc), local_midnight);

        let back = match self {
            Self::Today => 0,
            Self::Week => 6,
            Self::Month => 29,
            Self::All => return (DateTime::<Utc>::UNIX_EPOCH, end),
        };

        let start = today
            .checked_sub_days(Days::new(back))
            .map_or(DateTime::<Utc>::UNIX_EPOCH, local_midnight);

        (start, end)
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::All => "All Time",
        }
    }
}

fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |t| t.with_timezone(&Utc))
}

/// Aggregated history for one period.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    /// Report period name
    pub period: String,
    /// Number of sessions
    pub sessions: usize,
    /// Total workout time
    pub total_seconds: i64,
    /// Average session length
    pub average_seconds: i64,
    /// Longest session
    pub longest_seconds: i64,
    /// Time per plan, most time first
    pub by_plan: Vec<PlanTotals>,
    /// Time per local day, newest first
    pub daily: Vec<DailyTotals>,
}

/// Workout time for one plan name.
#[derive(Debug, Clone, Serialize)]
pub struct PlanTotals {
    pub plan_name: String,
    pub sessions: usize,
    pub seconds: i64,
}

/// Workout time for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTotals {
    pub date: String,
    pub sessions: usize,
    pub seconds: i64,
}

impl HistoryReport {
    /// Generate a report for the period ending today.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be read.
    pub fn generate(
        storage: &HistoryStorage,
        period: ReportPeriod,
        now: DateTime<Local>,
    ) -> Result<Self, FitTrackError> {
        let (start, end) = period.range(now);
        let sessions = storage.get_range(start, end)?;
        Ok(Self::from_sessions(period, &sessions))
    }

    /// Aggregate an already loaded set of sessions.
    #[must_use]
    pub fn from_sessions(period: ReportPeriod, sessions: &[SessionSummary]) -> Self {
        let total_seconds: i64 = sessions.iter().map(|s| s.duration_seconds).sum();
        let count = sessions.len();
        let average_seconds = i64::try_from(count)
            .ok()
            .filter(|&n| n > 0)
            .map_or(0, |n| total_seconds / n);
        let longest_seconds = sessions.iter().map(|s| s.duration_seconds).max().unwrap_or(0);

        let mut plan_map: HashMap<&str, (usize, i64)> = HashMap::new();
        for session in sessions {
            let entry = plan_map.entry(session.plan_name.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += session.duration_seconds;
        }

        let mut by_plan: Vec<PlanTotals> = plan_map
            .into_iter()
            .map(|(name, (sessions, seconds))| PlanTotals {
                plan_name: name.to_string(),
                sessions,
                seconds,
            })
            .collect();
        by_plan.sort_by(|a, b| b.seconds.cmp(&a.seconds).then_with(|| a.plan_name.cmp(&b.plan_name)));

        let mut daily_map: HashMap<NaiveDate, (usize, i64)> = HashMap::new();
        for session in sessions {
            let entry = daily_map
                .entry(session.started_at_local().date_naive())
                .or_insert((0, 0));
            entry.0 += 1;
            entry.1 += session.duration_seconds;
        }

        let mut days: Vec<_> = daily_map.into_iter().collect();
        days.sort_by(|a, b| b.0.cmp(&a.0));
        let daily = days
            .into_iter()
            .map(|(date, (sessions, seconds))| DailyTotals {
                date: date.to_string(),
                sessions,
                seconds,
            })
            .collect();

        Self {
            period: period.display_name().to_string(),
            sessions: count,
            total_seconds,
            average_seconds,
            longest_seconds,
            by_plan,
            daily,
        }
    }
}
