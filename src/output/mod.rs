//! Output formatting for VisionCare.
//!
//! This module provides formatters for displaying session data in various formats.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::VisionError;
use crate::features::session::{BreakPolicy, Exercise, HealthLogEntry, Snapshot, WeeklyReport};

pub use json::*;
pub use pretty::*;

/// Format the session snapshot based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_status(
    snapshot: &Snapshot,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(snapshot, today)),
        OutputFormat::Json => format_status_json(snapshot),
    }
}

/// Format the break policy based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_policy(policy: &BreakPolicy, format: OutputFormat) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_policy_pretty(policy)),
        OutputFormat::Json => to_json(policy),
    }
}

/// Format the exercise catalog based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_exercises(exercises: &[Exercise], format: OutputFormat) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercises_pretty(exercises)),
        OutputFormat::Json => format_exercises_json(exercises),
    }
}

/// Format a single exercise based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_exercise(exercise: &Exercise, format: OutputFormat) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_exercise_pretty(exercise)),
        OutputFormat::Json => to_json(exercise),
    }
}

/// Format health log entries based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_health_logs(
    entries: &[HealthLogEntry],
    format: OutputFormat,
) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_health_logs_pretty(entries)),
        OutputFormat::Json => format_health_logs_json(entries),
    }
}

/// Format the weekly report based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_report(report: &WeeklyReport, format: OutputFormat) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_report_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}

/// Format the next checkup date based on output format
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_checkup(
    date: Option<NaiveDate>,
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, VisionError> {
    match format {
        OutputFormat::Pretty => Ok(format_checkup_pretty(date, today)),
        OutputFormat::Json => format_checkup_json(date, today),
    }
}
