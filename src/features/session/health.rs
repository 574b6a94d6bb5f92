//! Symptom log.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VisionError;

/// Entries kept before the oldest is evicted.
pub const MAX_HEALTH_LOGS: usize = 30;

/// One self-reported symptom entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthLogEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub symptoms: BTreeSet<String>,
    /// 1 (mild) to 5 (severe).
    pub severity: u8,
    pub notes: String,
    /// Today's screen time when the entry was logged. Stamped by the session manager.
    pub screen_time_hours_at_logging: f64,
}

impl HealthLogEntry {
    /// Build an entry dated now.
    ///
    /// Symptoms are trimmed and lower-cased; blank ones are dropped.
    ///
    /// # Errors
    ///
    /// Returns `VisionError::InvalidInput` if severity is outside 1-5.
    pub fn new<I, T>(symptoms: I, severity: u8, notes: impl Into<String>) -> Result<Self, VisionError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        if !(1..=5).contains(&severity) {
            return Err(VisionError::InvalidInput(format!(
                "severity must be 1-5, got {severity}"
            )));
        }

        let symptoms = symptoms
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            symptoms,
            severity,
            notes: notes.into().trim().to_string(),
            screen_time_hours_at_logging: 0.0,
        })
    }
}

/// Bounded, newest-first list of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthLog {
    entries: Vec<HealthLogEntry>,
}

impl HealthLog {
    /// Wrap existing entries, keeping the newest [`MAX_HEALTH_LOGS`].
    #[must_use]
    pub fn from_entries(mut entries: Vec<HealthLogEntry>) -> Self {
        entries.truncate(MAX_HEALTH_LOGS);
        Self { entries }
    }

    /// Add an entry at the front, evicting the oldest on overflow.
    ///
    /// Returns the evicted entry, if any.
    pub fn push(&mut self, entry: HealthLogEntry) -> Option<HealthLogEntry> {
        self.entries.insert(0, entry);
        if self.entries.len() > MAX_HEALTH_LOGS {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[HealthLogEntry] {
        &self.entries
    }
}
