use chrono::{Duration, Local, NaiveDate};
use colored::Colorize;

use crate::features::session::{
    days_until, BreakPolicy, Exercise, HealthLogEntry, Snapshot, WeeklyReport,
};

/// Format minutes as `1h 05m` or `45m`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as i64;
    let hours = total / 60;
    let mins = total % 60;

    if hours > 0 {
        format!("{hours}h {mins:02}m")
    } else {
        format!("{mins}m")
    }
}

/// Format a countdown as `mm:ss`.
#[must_use]
pub fn format_countdown(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Render a progress bar. `progress` is clamped to 0..=1.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Short label for the tracking/break state.
#[must_use]
pub const fn state_label(snapshot: &Snapshot) -> &'static str {
    if snapshot.is_on_break {
        "on break"
    } else if snapshot.is_tracking {
        "tracking"
    } else {
        "idle"
    }
}

fn policy_summary(policy: &BreakPolicy) -> String {
    if policy.enabled {
        format!(
            "{}-minute break every {} minutes",
            policy.duration_minutes, policy.interval_minutes
        )
    } else {
        "automatic breaks disabled".to_string()
    }
}

fn checkup_summary(date: Option<NaiveDate>, today: NaiveDate) -> String {
    match date {
        None => "not scheduled".to_string(),
        Some(date) => match days_until(date, today) {
            0 => format!("{date} (today)"),
            1 => format!("{date} (tomorrow)"),
            n if n < 0 => format!("{date} ({} days overdue)", -n),
            n => format!("{date} (in {n} days)"),
        },
    }
}

/// Format the session snapshot.
#[must_use]
pub fn format_status_pretty(snapshot: &Snapshot, today: NaiveDate) -> String {
    let state = match state_label(snapshot) {
        "on break" => "on break".yellow(),
        "tracking" => "tracking".green(),
        other => other.dimmed(),
    };

    let mut output = format!("{}\n", "VisionCare".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("  {}: {}\n", "State".dimmed(), state));
    output.push_str(&format!(
        "  {}: {}\n",
        "Today".dimmed(),
        format_minutes(snapshot.screen_time.daily_minutes).bold()
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "This week".dimmed(),
        format_minutes(snapshot.screen_time.weekly_total())
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Breaks".dimmed(),
        policy_summary(&snapshot.break_policy)
    ));

    if let Some(exercise) = &snapshot.active_exercise {
        output.push_str(&format!(
            "  {}: {}\n",
            "Exercise".dimmed(),
            exercise.name.cyan()
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Health logs".dimmed(),
        snapshot.health_logs.len()
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Next checkup".dimmed(),
        checkup_summary(snapshot.next_checkup_date, today)
    ));

    output
}

/// Format the break policy.
#[must_use]
pub fn format_policy_pretty(policy: &BreakPolicy) -> String {
    let enabled = if policy.enabled {
        "yes".green()
    } else {
        "no".red()
    };

    let mut output = format!("{}\n", "Break policy".bold());
    output.push_str(&format!(
        "  {}: {} minutes\n",
        "Interval".dimmed(),
        policy.interval_minutes
    ));
    output.push_str(&format!(
        "  {}: {} minutes\n",
        "Duration".dimmed(),
        policy.duration_minutes
    ));
    output.push_str(&format!("  {}: {}\n", "Enabled".dimmed(), enabled));
    output
}

/// Format the exercise catalog.
#[must_use]
pub fn format_exercises_pretty(exercises: &[Exercise]) -> String {
    if exercises.is_empty() {
        return "Exercises (0)\n  No exercises".to_string();
    }

    let mut output = format!("Exercises ({})\n", exercises.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for exercise in exercises {
        output.push_str(&format!(
            "  {:<14} {:<20} {:>4}s  {}\n",
            exercise.id.cyan(),
            exercise.name.bold(),
            exercise.duration_seconds,
            exercise.description.dimmed()
        ));
    }

    output
}

/// Format one exercise with its steps.
#[must_use]
pub fn format_exercise_pretty(exercise: &Exercise) -> String {
    let mut output = format!("{}\n", exercise.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), exercise.id));
    output.push_str(&format!(
        "  {}: {}\n",
        "Duration".dimmed(),
        format_countdown(Duration::seconds(i64::from(exercise.duration_seconds)))
    ));
    output.push_str(&format!("  {}\n", exercise.description));
    output.push_str(&format!("  {}:\n", "Steps".dimmed()));

    for (i, step) in exercise.steps.iter().enumerate() {
        output.push_str(&format!("    {}. {}\n", i + 1, step));
    }

    output
}

/// Format health log entries, newest first.
#[must_use]
pub fn format_health_logs_pretty(entries: &[HealthLogEntry]) -> String {
    if entries.is_empty() {
        return "Health log (0 entries)\n  No entries".to_string();
    }

    let mut output = format!("Health log ({} entries)\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let severity = match entry.severity {
            1 | 2 => entry.severity.to_string().green(),
            3 => entry.severity.to_string().yellow(),
            _ => entry.severity.to_string().red(),
        };
        let symptoms = if entry.symptoms.is_empty() {
            "-".to_string()
        } else {
            entry
                .symptoms
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut line = format!(
            "{}  severity {}  {}  {}",
            entry
                .date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            severity,
            symptoms.bold(),
            format!(
                "({} screen time)",
                format_minutes(entry.screen_time_hours_at_logging * 60.0)
            )
            .dimmed()
        );

        if !entry.notes.is_empty() {
            line.push_str(&format!("\n    {}", entry.notes));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format the weekly report with per-day bars.
#[must_use]
pub fn format_report_pretty(report: &WeeklyReport) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{}", "Screen Time: Last 7 Days".bold()));
    lines.push("═".repeat(50));
    lines.push(format!(
        "  Total:          {}",
        format_minutes(report.total_minutes)
    ));
    lines.push(format!(
        "  Daily average:  {}",
        format_minutes(report.average_minutes)
    ));
    lines.push(format!(
        "  Busiest day:    {}",
        report.busiest_day.as_deref().unwrap_or("-")
    ));
    lines.push(String::new());

    let peak = report.peak_minutes().max(1.0);
    for day in &report.days {
        let label = if day.is_today {
            day.day.bold().to_string()
        } else {
            day.day.clone()
        };
        lines.push(format!(
            "  {} {} {:>7}",
            label,
            render_progress_bar(day.minutes / peak, 24),
            format_minutes(day.minutes)
        ));
    }

    lines.join("\n")
}

/// Format the next checkup date.
#[must_use]
pub fn format_checkup_pretty(date: Option<NaiveDate>, today: NaiveDate) -> String {
    format!(
        "{}: {}",
        "Next checkup".bold(),
        checkup_summary(date, today)
    )
}
