//! JSON output formatting for VisionCare.
//!
//! This module provides functions for formatting session data as JSON.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use super::pretty::state_label;
use crate::error::VisionError;
use crate::features::session::{days_until, Exercise, HealthLogEntry, Snapshot};

/// Format the session snapshot as JSON, with a derived `state` field.
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_status_json(snapshot: &Snapshot) -> Result<String, VisionError> {
    let output = json!({
        "state": state_label(snapshot),
        "daily_minutes": snapshot.screen_time.daily_minutes,
        "weekly_total_minutes": snapshot.screen_time.weekly_total(),
        "snapshot": snapshot,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the exercise catalog as JSON
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_exercises_json(exercises: &[Exercise]) -> Result<String, VisionError> {
    let output = json!({
        "count": exercises.len(),
        "items": exercises
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format health log entries as JSON
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_health_logs_json(entries: &[HealthLogEntry]) -> Result<String, VisionError> {
    let output = json!({
        "count": entries.len(),
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the next checkup date as JSON
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn format_checkup_json(date: Option<NaiveDate>, today: NaiveDate) -> Result<String, VisionError> {
    let output = json!({
        "next_checkup_date": date,
        "days_until": date.map(|d| days_until(d, today)),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `VisionError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, VisionError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::session::{exercise, BreakPolicy};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_format_status_json() {
        let mut snapshot = Snapshot::empty(today(), BreakPolicy::default());
        snapshot.is_on_break = true;
        snapshot.screen_time.daily_minutes = 20.0;

        let result = format_status_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["state"], "on break");
        assert_eq!(value["daily_minutes"], 20.0);
        assert_eq!(value["snapshot"]["break_policy"]["interval_minutes"], 20);
        assert_eq!(value["snapshot"]["next_checkup_date"], serde_json::Value::Null);
    }

    #[test]
    fn test_format_exercises_json() {
        let result = format_exercises_json(&exercise::catalog()).unwrap();

        assert!(result.contains("\"count\": 5"));
        assert!(result.contains("\"id\": \"20-20-20\""));
    }

    #[test]
    fn test_format_health_logs_json_empty() {
        let result = format_health_logs_json(&[]).unwrap();

        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_health_log_entry_fields() {
        let entry = HealthLogEntry::new(["headache"], 4, "after a long call").unwrap();
        let result = format_health_logs_json(&[entry]).unwrap();

        assert!(result.contains("\"severity\": 4"));
        assert!(result.contains("\"headache\""));
        assert!(result.contains("\"screen_time_hours_at_logging\": 0.0"));
    }

    #[test]
    fn test_format_checkup_json() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 26);
        let result = format_checkup_json(date, today()).unwrap();

        assert!(result.contains("\"next_checkup_date\": \"2026-10-26\""));
        assert!(result.contains("\"days_until\": 7"));
    }
}
