//! Session data model.
//!
//! Screen time counters, the break policy, and the persisted snapshot.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::exercise::Exercise;
use super::health::HealthLogEntry;
use crate::error::VisionError;
use crate::storage::PersistenceStore;

/// Day names indexed by [`weekday_index`].
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Index into the weekly buckets: 0 = Sunday .. 6 = Saturday.
#[must_use]
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Accrued screen time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenTimeCounter {
    /// Minutes accrued today.
    pub daily_minutes: f64,
    /// Minutes per weekday, Sunday first.
    pub weekly_minutes: [f64; 7],
    /// Calendar day `daily_minutes` belongs to.
    #[serde(default = "today")]
    pub day: NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Default for ScreenTimeCounter {
    fn default() -> Self {
        Self::new(today())
    }
}

impl ScreenTimeCounter {
    /// An empty counter for `day`.
    #[must_use]
    pub const fn new(day: NaiveDate) -> Self {
        Self {
            daily_minutes: 0.0,
            weekly_minutes: [0.0; 7],
            day,
        }
    }

    /// Add `minutes` to today's total and to the weekday bucket of `at`.
    pub fn accrue(&mut self, minutes: f64, at: DateTime<Local>) {
        let index = weekday_index(at.date_naive());
        self.daily_minutes += minutes;
        self.weekly_minutes[index] += minutes;
    }

    /// Move the counter to `today` if the date has changed.
    ///
    /// Zeroes the daily total and the weekly buckets of every day that
    /// elapsed, so the buckets always describe the trailing seven days.
    /// A clock that moved backwards is ignored. Returns whether a rollover
    /// happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today <= self.day {
            return false;
        }

        let elapsed = (today - self.day).num_days();
        if elapsed >= 7 {
            self.weekly_minutes = [0.0; 7];
        } else {
            let mut day = self.day;
            for _ in 0..elapsed {
                day = day.succ_opt().unwrap_or(day);
                self.weekly_minutes[weekday_index(day)] = 0.0;
            }
        }

        self.daily_minutes = 0.0;
        self.day = today;
        true
    }

    /// Sum of the weekly buckets.
    #[must_use]
    pub fn weekly_total(&self) -> f64 {
        self.weekly_minutes.iter().sum()
    }

    /// Today's screen time in hours.
    #[must_use]
    pub fn daily_hours(&self) -> f64 {
        self.daily_minutes / 60.0
    }
}

/// Allowed range for [`BreakPolicy::interval_minutes`].
pub const INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 1..=120;
/// Allowed range for [`BreakPolicy::duration_minutes`].
pub const DURATION_RANGE: std::ops::RangeInclusive<u32> = 1..=30;

/// When breaks are due and how long they last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// Minutes of screen time between breaks.
    pub interval_minutes: u32,
    /// Break length in minutes.
    pub duration_minutes: u32,
    /// Whether breaks trigger automatically.
    pub enabled: bool,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            interval_minutes: 20,
            duration_minutes: 5,
            enabled: true,
        }
    }
}

impl BreakPolicy {
    /// Check that both durations are within range.
    ///
    /// # Errors
    ///
    /// Returns `VisionError::InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<(), VisionError> {
        if !INTERVAL_RANGE.contains(&self.interval_minutes) {
            return Err(VisionError::InvalidInput(format!(
                "break interval must be {}-{} minutes, got {}",
                INTERVAL_RANGE.start(),
                INTERVAL_RANGE.end(),
                self.interval_minutes
            )));
        }
        if !DURATION_RANGE.contains(&self.duration_minutes) {
            return Err(VisionError::InvalidInput(format!(
                "break duration must be {}-{} minutes, got {}",
                DURATION_RANGE.start(),
                DURATION_RANGE.end(),
                self.duration_minutes
            )));
        }
        Ok(())
    }

    /// Apply a partial update, returning the merged policy.
    #[must_use]
    pub fn merged(&self, update: BreakPolicyUpdate) -> Self {
        Self {
            interval_minutes: update.interval_minutes.unwrap_or(self.interval_minutes),
            duration_minutes: update.duration_minutes.unwrap_or(self.duration_minutes),
            enabled: update.enabled.unwrap_or(self.enabled),
        }
    }
}

/// A partial [`BreakPolicy`] change; `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BreakPolicyUpdate {
    /// New interval, if changing.
    pub interval_minutes: Option<u32>,
    /// New duration, if changing.
    pub duration_minutes: Option<u32>,
    /// New enabled flag, if changing.
    pub enabled: Option<bool>,
}

impl BreakPolicyUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.interval_minutes.is_none() && self.duration_minutes.is_none() && self.enabled.is_none()
    }
}

/// Store keys, one per snapshot field.
pub mod keys {
    pub const SCREEN_TIME: &str = "screen_time";
    pub const BREAK_POLICY: &str = "break_policy";
    pub const IS_TRACKING: &str = "is_tracking";
    pub const IS_ON_BREAK: &str = "is_on_break";
    pub const HEALTH_LOGS: &str = "health_logs";
    pub const ACTIVE_EXERCISE: &str = "active_exercise";
    pub const IS_EXERCISING: &str = "is_exercising";
    pub const NEXT_CHECKUP_DATE: &str = "next_checkup_date";
}

/// Everything the session manager persists and exposes to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub screen_time: ScreenTimeCounter,
    pub break_policy: BreakPolicy,
    pub is_tracking: bool,
    pub is_on_break: bool,
    pub health_logs: Vec<HealthLogEntry>,
    pub active_exercise: Option<Exercise>,
    pub is_exercising: bool,
    pub next_checkup_date: Option<NaiveDate>,
}

impl Snapshot {
    /// An empty snapshot for a first run.
    #[must_use]
    pub const fn empty(day: NaiveDate, break_policy: BreakPolicy) -> Self {
        Self {
            screen_time: ScreenTimeCounter::new(day),
            break_policy,
            is_tracking: false,
            is_on_break: false,
            health_logs: Vec::new(),
            active_exercise: None,
            is_exercising: false,
            next_checkup_date: None,
        }
    }

    /// Serialize each field under its own key.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be serialized.
    pub fn to_entries(&self) -> Result<Vec<(&'static str, String)>, VisionError> {
        Ok(vec![
            (keys::SCREEN_TIME, serde_json::to_string(&self.screen_time)?),
            (keys::BREAK_POLICY, serde_json::to_string(&self.break_policy)?),
            (keys::IS_TRACKING, serde_json::to_string(&self.is_tracking)?),
            (keys::IS_ON_BREAK, serde_json::to_string(&self.is_on_break)?),
            (keys::HEALTH_LOGS, serde_json::to_string(&self.health_logs)?),
            (keys::ACTIVE_EXERCISE, serde_json::to_string(&self.active_exercise)?),
            (keys::IS_EXERCISING, serde_json::to_string(&self.is_exercising)?),
            (keys::NEXT_CHECKUP_DATE, serde_json::to_string(&self.next_checkup_date)?),
        ])
    }

    /// Load a snapshot field by field.
    ///
    /// Missing fields take first-run defaults. Unreadable or corrupt fields
    /// are logged and replaced by defaults; loading never fails.
    pub fn load<S: PersistenceStore + ?Sized>(
        store: &S,
        day: NaiveDate,
        default_policy: BreakPolicy,
    ) -> Self {
        let defaults = Self::empty(day, default_policy);

        let break_policy = load_field::<BreakPolicy, S>(store, keys::BREAK_POLICY)
            .filter(|policy| match policy.validate() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Ignoring stored break policy: {e}");
                    false
                }
            })
            .unwrap_or(defaults.break_policy);

        let mut health_logs: Vec<HealthLogEntry> =
            load_field(store, keys::HEALTH_LOGS).unwrap_or_default();
        health_logs.truncate(super::health::MAX_HEALTH_LOGS);

        Self {
            screen_time: load_field(store, keys::SCREEN_TIME).unwrap_or(defaults.screen_time),
            break_policy,
            is_tracking: load_field(store, keys::IS_TRACKING).unwrap_or(false),
            is_on_break: load_field(store, keys::IS_ON_BREAK).unwrap_or(false),
            health_logs,
            active_exercise: load_field::<Option<Exercise>, S>(store, keys::ACTIVE_EXERCISE)
                .flatten(),
            is_exercising: load_field(store, keys::IS_EXERCISING).unwrap_or(false),
            next_checkup_date: load_field::<Option<NaiveDate>, S>(store, keys::NEXT_CHECKUP_DATE)
                .flatten(),
        }
    }
}

fn load_field<T: DeserializeOwned, S: PersistenceStore + ?Sized>(store: &S, key: &str) -> Option<T> {
    match store.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring corrupt stored value for {key}: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Could not load {key}: {e}");
            None
        }
    }
}
