//! Health log commands.

use colored::Colorize;

use crate::cli::args::{LogCommands, OutputFormat};
use crate::error::VisionError;
use crate::features::session::HealthLogEntry;
use crate::output::{format_health_logs, format_minutes, to_json};

use super::Context;

/// Execute log subcommands.
///
/// # Errors
///
/// Returns an error if the entry is invalid or cannot be saved.
pub fn health_log(ctx: &Context, cmd: Option<LogCommands>) -> Result<String, VisionError> {
    match cmd.unwrap_or(LogCommands::List { limit: None }) {
        LogCommands::Add {
            severity,
            symptoms,
            notes,
        } => {
            let entry = HealthLogEntry::new(symptoms, severity, notes.unwrap_or_default())?;

            let mut session = ctx.open_session()?;
            session.add_health_log_entry(entry);
            ctx.ensure_saved(&session)?;

            let Some(logged) = session.health_logs().first() else {
                return Err(VisionError::NotFound("Logged entry missing".to_string()));
            };
            match ctx.format {
                OutputFormat::Json => to_json(logged),
                OutputFormat::Pretty => Ok(format!(
                    "{} Logged severity {} after {} of screen time today",
                    "✓".green(),
                    logged.severity,
                    format_minutes(logged.screen_time_hours_at_logging * 60.0)
                )),
            }
        }

        LogCommands::List { limit } => {
            let snapshot = ctx.load_snapshot()?;
            let limit = limit.unwrap_or(snapshot.health_logs.len());
            let entries: Vec<HealthLogEntry> =
                snapshot.health_logs.into_iter().take(limit).collect();
            format_health_logs(&entries, ctx.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::context::test_support::temp_context;

    fn add(ctx: &Context, severity: u8, notes: &str) {
        health_log(
            ctx,
            Some(LogCommands::Add {
                severity,
                symptoms: vec!["Dryness".to_string()],
                notes: Some(notes.to_string()),
            }),
        )
        .unwrap();
    }

    #[test]
    fn test_log_add_then_list_newest_first() {
        let (_dir, ctx) = temp_context(OutputFormat::Json);
        add(&ctx, 2, "morning");
        add(&ctx, 4, "evening");

        let snapshot = ctx.load_snapshot().unwrap();
        assert_eq!(snapshot.health_logs.len(), 2);
        assert_eq!(snapshot.health_logs[0].notes, "evening");
        assert!(snapshot.health_logs[0].symptoms.contains("dryness"));

        let output = health_log(&ctx, Some(LogCommands::List { limit: Some(1) })).unwrap();
        assert!(output.contains("\"count\": 1"));
        assert!(output.contains("evening"));
    }

    #[test]
    fn test_log_list_default_empty() {
        let (_dir, ctx) = temp_context(OutputFormat::Pretty);
        let output = health_log(&ctx, None).unwrap();
        assert!(output.contains("No entries"));
    }
}
