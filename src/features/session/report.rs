//! Weekly screen time report.
//!
//! Built from the trailing seven-day buckets of a [`ScreenTimeCounter`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{weekday_index, ScreenTimeCounter, WEEKDAY_NAMES};

/// Screen time for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayUsage {
    /// Short day name ("Mon").
    pub day: String,
    /// Minutes of screen time.
    pub minutes: f64,
    /// Whether this is the counter's current day.
    pub is_today: bool,
}

/// Screen time summary over the trailing week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Per-day usage, starting the day after today and ending today.
    pub days: Vec<DayUsage>,
    /// Sum over all days.
    pub total_minutes: f64,
    /// Average over days with any screen time.
    pub average_minutes: f64,
    /// Day with the most screen time, if any.
    pub busiest_day: Option<String>,
    /// Today's screen time.
    pub today_minutes: f64,
}

impl WeeklyReport {
    /// Generate a report from the weekly buckets.
    #[must_use]
    pub fn generate(counter: &ScreenTimeCounter) -> Self {
        let today = weekday_index(counter.day);
        let days: Vec<DayUsage> = (1..=7)
            .map(|offset| (today + offset) % 7)
            .map(|index| DayUsage {
                day: WEEKDAY_NAMES[index].to_string(),
                minutes: counter.weekly_minutes[index],
                is_today: index == today,
            })
            .collect();

        let active: Vec<f64> = days
            .iter()
            .map(|d| d.minutes)
            .filter(|m| *m > 0.0)
            .collect();
        let total_minutes = counter.weekly_total();

        #[allow(clippy::cast_precision_loss)]
        let average_minutes = if active.is_empty() {
            0.0
        } else {
            total_minutes / active.len() as f64
        };

        let busiest_day = days
            .iter()
            .filter(|d| d.minutes > 0.0)
            .max_by(|a, b| a.minutes.total_cmp(&b.minutes))
            .map(|d| d.day.clone());

        Self {
            days,
            total_minutes,
            average_minutes,
            busiest_day,
            today_minutes: counter.daily_minutes,
        }
    }

    /// Minutes of the busiest day, used to scale bars.
    #[must_use]
    pub fn peak_minutes(&self) -> f64 {
        self.days.iter().map(|d| d.minutes).fold(0.0, f64::max)
    }

    /// Total in hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.total_minutes / 60.0
    }
}

/// Days until `date`, negative if it has passed.
#[must_use]
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> ScreenTimeCounter {
        // Monday
        let mut counter = ScreenTimeCounter::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        counter.daily_minutes = 30.0;
        counter.weekly_minutes = [0.0, 30.0, 0.0, 0.0, 120.0, 90.0, 0.0];
        counter
    }

    #[test]
    fn test_days_end_with_today() {
        let report = WeeklyReport::generate(&counter());

        assert_eq!(report.days.len(), 7);
        assert_eq!(report.days[0].day, "Tue");
        assert_eq!(report.days[6].day, "Mon");
        assert!(report.days[6].is_today);
        assert_eq!(report.days.iter().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn test_totals() {
        let report = WeeklyReport::generate(&counter());

        assert_eq!(report.total_minutes, 240.0);
        assert_eq!(report.average_minutes, 80.0);
        assert_eq!(report.busiest_day.as_deref(), Some("Thu"));
        assert_eq!(report.peak_minutes(), 120.0);
        assert!((report.total_hours() - 4.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_week() {
        let empty = ScreenTimeCounter::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let report = WeeklyReport::generate(&empty);

        assert_eq!(report.total_minutes, 0.0);
        assert_eq!(report.average_minutes, 0.0);
        assert!(report.busiest_day.is_none());
    }

    #[test]
    fn test_days_until() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(days_until(NaiveDate::from_ymd_opt(2026, 10, 26).unwrap(), today), 7);
        assert_eq!(days_until(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), today), -1);
    }
}
