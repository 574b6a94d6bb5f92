//! UI rendering for the dashboard.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::core::{ClockSource, NotificationKind};
use crate::output::format_minutes;
use crate::storage::PersistenceStore;
use crate::tui::app::{App, HELP};

/// Render the application UI.
pub fn render<S: PersistenceStore, C: ClockSource>(frame: &mut Frame<'_>, app: &App<S, C>) {
    // Header, timers, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    render_header(frame, app, chunks[0]);
    render_timers(frame, app, chunks[1]);
    render_exercises(frame, app, body[0]);
    render_messages(frame, app, body[1]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_header<S: PersistenceStore, C: ClockSource>(
    frame: &mut Frame<'_>,
    app: &App<S, C>,
    area: Rect,
) {
    let state_color = match app.state_label() {
        "ON BREAK" => Color::Yellow,
        "TRACKING" => Color::Green,
        _ => Color::DarkGray,
    };
    let screen_time = app.session.screen_time();

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.state_label()),
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  Today {}  |  Week {}",
            format_minutes(screen_time.daily_minutes),
            format_minutes(screen_time.weekly_total())
        )),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" VisionCare ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

fn render_timers<S: PersistenceStore, C: ClockSource>(
    frame: &mut Frame<'_>,
    app: &App<S, C>,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let (ratio, label) = app.break_gauge();
    let color = if app.session.is_on_break() {
        Color::Yellow
    } else {
        Color::Green
    };
    let break_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Breaks "))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(label);
    frame.render_widget(break_gauge, rows[0]);

    let (ratio, label) = app
        .exercise_gauge()
        .unwrap_or_else(|| (0.0, "No exercise running".to_string()));
    let exercise_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Exercise "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(label);
    frame.render_widget(exercise_gauge, rows[1]);
}

fn render_exercises<S: PersistenceStore, C: ClockSource>(
    frame: &mut Frame<'_>,
    app: &App<S, C>,
    area: Rect,
) {
    let items: Vec<ListItem<'_>> = app
        .exercises
        .iter()
        .enumerate()
        .map(|(i, exercise)| {
            let is_selected = i == app.selected;
            let spans = vec![
                Span::styled(
                    &exercise.name,
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("  {}s", exercise.duration_seconds),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Exercises (x to start) "),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_messages<S: PersistenceStore, C: ClockSource>(
    frame: &mut Frame<'_>,
    app: &App<S, C>,
    area: Rect,
) {
    let mut lines: Vec<Line<'_>> = Vec::new();

    // Steps of the running exercise come first
    if let Some(exercise) = app.session.active_exercise() {
        for (i, step) in exercise.steps.iter().enumerate() {
            lines.push(Line::from(format!("{}. {step}", i + 1)));
        }
        lines.push(Line::from(""));
    }

    for message in app.messages.iter().rev() {
        let color = match message.kind {
            NotificationKind::BreakStarted => Color::Yellow,
            NotificationKind::StorageUnavailable => Color::Red,
            NotificationKind::ExerciseStarted | NotificationKind::ExerciseComplete => {
                Color::Magenta
            }
            _ => Color::Cyan,
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", message.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(message.body.as_str()),
        ]));
    }

    let messages = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Notifications "));

    frame.render_widget(messages, area);
}

fn render_status_bar<S: PersistenceStore, C: ClockSource>(
    frame: &mut Frame<'_>,
    app: &App<S, C>,
    area: Rect,
) {
    let status_text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
