//! Session history.
//!
//! Stores finished workout sessions and reports on them.

pub mod report;
pub mod storage;

pub use report::{DailyTotals, HistoryReport, PlanTotals, ReportPeriod};
pub use storage::HistoryStorage;
