//! UI rendering for the session screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::features::session::{Phase, SessionState};
use crate::output::{format_clock, format_duration};
use crate::tui::app::App;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let state = app.state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(7), // Countdown
            Constraint::Min(0),    // Exercises
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, &state, chunks[0]);
    render_countdown(frame, app, &state, chunks[1]);
    render_exercises(frame, app, &state, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Idle => Color::White,
        Phase::Working => Color::Green,
        Phase::Resting => Color::Yellow,
        Phase::Finished => Color::Cyan,
    }
}

fn render_header(frame: &mut Frame<'_>, app: &App, state: &SessionState, area: Rect) {
    let title = format!(" {} | {} ", app.plan.name, state.phase);

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_countdown(frame: &mut Frame<'_>, app: &App, state: &SessionState, area: Rect) {
    let color = phase_color(state.phase);
    let mut lines = Vec::new();

    match state.phase {
        Phase::Idle => {
            lines.push(Line::from(Span::styled(
                format!("{} exercises, {} sets", app.plan.exercises.len(), app.plan.total_sets()),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        Phase::Finished => {
            let text = app.summary().map_or_else(
                || "Finished".to_string(),
                |s| format!("Finished in {}", format_duration(s.duration_seconds)),
            );
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        Phase::Working | Phase::Resting => {
            let mut clock = format_clock(state.remaining_seconds);
            if state.is_paused() {
                clock.push_str("  (paused)");
            }
            lines.push(Line::from(Span::styled(
                clock,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "{}  set {}  ({} left)",
                state.exercise_name.as_deref().unwrap_or_default(),
                state.current_set,
                state.sets_remaining
            )));
        }
    }

    let countdown = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", state.phase.display_name()))
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(countdown, area);
}

fn render_exercises(frame: &mut Frame<'_>, app: &App, state: &SessionState, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .plan
        .exercises
        .iter()
        .enumerate()
        .map(|(i, exercise)| {
            let current = state.phase.is_timed() && i == state.exercise_index;
            let done = state.is_finished() || (state.phase.is_timed() && i < state.exercise_index);

            let marker = if current {
                ">"
            } else if done {
                "x"
            } else {
                " "
            };
            let style = if current {
                Style::default().fg(phase_color(state.phase)).add_modifier(Modifier::BOLD)
            } else if done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} {}", exercise.name), style),
                Span::styled(
                    format!("  {} x {}  {}s", exercise.sets, exercise.reps, exercise.work_seconds),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Exercises ")
            .border_style(Style::default().fg(Color::White)),
    );

    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start | p:pause/resume | s:skip | q:stop");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
