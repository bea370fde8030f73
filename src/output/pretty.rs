use colored::Colorize;

use crate::features::history::HistoryReport;
use crate::features::plans::{Exercise, WorkoutPlan};
use crate::features::session::{Phase, SessionState, SessionSummary};

/// Format seconds as a short human-readable duration, e.g. `1h 05m` or `2m 30s`
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs:02}s")
    } else {
        format!("{secs}s")
    }
}

/// Format seconds as a countdown clock, e.g. `01:30`
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format a list of plans as a pretty table
#[must_use]
pub fn format_plans_pretty(plans: &[WorkoutPlan]) -> String {
    if plans.is_empty() {
        return "Plans (0 items)\n  No plans yet. Create one with 'fittrack plan create'".to_string();
    }

    let mut output = format!("Plans ({} items)\n", plans.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for plan in plans {
        let exercises = match plan.exercises.len() {
            1 => "1 exercise".to_string(),
            n => format!("{n} exercises"),
        };
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            format!("#{}", plan.id).dimmed(),
            plan.name.bold(),
            exercises.cyan(),
            format!("{} sets", plan.total_sets()).dimmed(),
        ));
    }

    output
}

/// Format a single plan with its exercises
#[must_use]
pub fn format_plan_pretty(plan: &WorkoutPlan, default_rest: u32) -> String {
    let mut output = format!("🏋 {}\n", plan.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), plan.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        plan.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Length".dimmed(),
        format_duration(i64::try_from(plan.nominal_seconds(default_rest)).unwrap_or(i64::MAX))
    ));

    if plan.exercises.is_empty() {
        output.push_str(&format!("\n  {}\n", "No exercises".dimmed()));
        return output;
    }

    output.push('\n');
    output.push_str(&"─".repeat(60));
    output.push('\n');
    for (i, exercise) in plan.exercises.iter().enumerate() {
        output.push_str(&format_exercise_line(i + 1, exercise, default_rest));
        output.push('\n');
    }

    output
}

fn format_exercise_line(position: usize, exercise: &Exercise, default_rest: u32) -> String {
    let rest = exercise.rest_seconds.map_or_else(
        || format!("rest {default_rest}s (default)").dimmed().to_string(),
        |r| format!("rest {r}s"),
    );
    let id = exercise
        .id
        .map_or_else(String::new, |id| format!("#{id}").dimmed().to_string());

    format!(
        "{:>2}. {}  {} x {} reps  work {}s  {}  {}",
        position,
        exercise.name.bold(),
        exercise.sets,
        exercise.reps,
        exercise.work_seconds,
        rest,
        id,
    )
}

/// Format session history as a pretty table
#[must_use]
pub fn format_history_pretty(sessions: &[SessionSummary], title: &str) -> String {
    if sessions.is_empty() {
        return format!("{title} (0 items)\n  No sessions recorded");
    }

    let mut output = format!("{} ({} items)\n", title, sessions.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for session in sessions {
        let id = session.id.map_or_else(String::new, |id| format!("#{id}"));
        output.push_str(&format!(
            "{} {}  {}  {}\n",
            id.dimmed(),
            session.started_at_local().format("%Y-%m-%d %H:%M"),
            session.plan_name.bold(),
            format_duration(session.duration_seconds).green(),
        ));
    }

    output
}

/// Format a finished session
#[must_use]
pub fn format_summary_pretty(summary: &SessionSummary) -> String {
    let mut output = Vec::new();
    output.push(format!("✅ {} finished!", summary.plan_name).green().to_string());
    output.push(format!("   Duration: {}", format_duration(summary.duration_seconds)));
    output.push(format!(
        "   Started:  {}",
        summary.started_at_local().format("%Y-%m-%d %H:%M:%S")
    ));
    output.push(format!(
        "   Ended:    {}",
        summary.ended_at_local().format("%Y-%m-%d %H:%M:%S")
    ));
    output.join("\n")
}

/// Format a history report
#[must_use]
pub fn format_report_pretty(report: &HistoryReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("📊 Workout Report: {}", report.period));
    lines.push("═".repeat(50));
    lines.push(String::new());

    lines.push("Summary".to_string());
    lines.push("─".repeat(40));
    lines.push(format!("  Sessions:          {}", report.sessions));
    lines.push(format!("  Total time:        {}", format_duration(report.total_seconds)));
    lines.push(format!("  Average session:   {}", format_duration(report.average_seconds)));
    lines.push(format!("  Longest session:   {}", format_duration(report.longest_seconds)));

    if !report.by_plan.is_empty() {
        lines.push(String::new());
        lines.push("By Plan".to_string());
        lines.push("─".repeat(40));
        for plan in report.by_plan.iter().take(10) {
            let name: String = if plan.plan_name.chars().count() > 25 {
                format!("{}...", plan.plan_name.chars().take(22).collect::<String>())
            } else {
                plan.plan_name.clone()
            };
            lines.push(format!(
                "  {:<25} {:>8} ({} sessions)",
                name,
                format_duration(plan.seconds),
                plan.sessions
            ));
        }
    }

    if !report.daily.is_empty() {
        lines.push(String::new());
        lines.push("Recent Days".to_string());
        lines.push("─".repeat(40));
        for day in report.daily.iter().take(7) {
            lines.push(format!(
                "  {} {:>8} ({} sessions)",
                day.date,
                format_duration(day.seconds),
                day.sessions
            ));
        }
    }

    lines.join("\n")
}

/// One line describing the session state, used by headless runs
#[must_use]
pub fn format_state_line(state: &SessionState) -> String {
    let exercise = state.exercise_name.as_deref().unwrap_or("-");
    match state.phase {
        Phase::Idle => "Ready".to_string(),
        Phase::Finished => "Finished".bold().to_string(),
        Phase::Working => format!(
            "{} {}  set {} ({} left)  {}",
            "▶ Work".green().bold(),
            exercise,
            state.current_set,
            state.sets_remaining,
            format_clock(state.remaining_seconds),
        ),
        Phase::Resting => format!(
            "{} after {}  {}",
            "⏸ Rest".yellow().bold(),
            exercise,
            format_clock(state.remaining_seconds),
        ),
    }
}
