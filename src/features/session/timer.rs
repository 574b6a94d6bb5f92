//! Timers driving the session state machine.
//!
//! Timers never fire on their own. The owner asks for the next due timer
//! up to some instant and handles it, which keeps the state machine
//! single-threaded and lets tests run on simulated time.

use chrono::{DateTime, Duration, Local};

/// What a timer is for. At most one timer of each kind is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Repeating screen time accrual.
    Tick,
    /// End of the current break.
    BreakEnd,
    /// End of the current exercise.
    ExerciseEnd,
}

/// Identifies one scheduled timer.
///
/// Handles are unique: cancelling with a stale handle never touches a
/// timer scheduled later for the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    kind: TimerKind,
}

impl TimerHandle {
    /// The timer's kind.
    #[must_use]
    pub const fn kind(&self) -> TimerKind {
        self.kind
    }
}

#[derive(Debug, Clone)]
struct ScheduledTimer {
    handle: TimerHandle,
    deadline: DateTime<Local>,
    period: Option<Duration>,
}

/// The set of armed timers.
#[derive(Debug, Default)]
pub struct TimerSet {
    timers: Vec<ScheduledTimer>,
    next_id: u64,
}

impl TimerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer, replacing any timer of the same kind.
    pub fn schedule_once(&mut self, kind: TimerKind, deadline: DateTime<Local>) -> TimerHandle {
        self.insert(kind, deadline, None)
    }

    /// Arm a repeating timer, replacing any timer of the same kind.
    ///
    /// Fires first at `first`, then every `period` after the previous deadline.
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        first: DateTime<Local>,
        period: Duration,
    ) -> TimerHandle {
        self.insert(kind, first, Some(period))
    }

    fn insert(
        &mut self,
        kind: TimerKind,
        deadline: DateTime<Local>,
        period: Option<Duration>,
    ) -> TimerHandle {
        self.timers.retain(|t| t.handle.kind != kind);

        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            kind,
        };
        self.timers.push(ScheduledTimer {
            handle,
            deadline,
            period,
        });
        handle
    }

    /// Disarm the timer behind `handle`. Returns false if it already fired or was replaced.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Whether `handle` is still armed.
    #[must_use]
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Deadline of the armed timer of `kind`.
    #[must_use]
    pub fn deadline(&self, kind: TimerKind) -> Option<DateTime<Local>> {
        self.timers
            .iter()
            .find(|t| t.handle.kind == kind)
            .map(|t| t.deadline)
    }

    /// Earliest deadline of all armed timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Local>> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Move the deadline of the armed timer of `kind`.
    pub fn reschedule(&mut self, kind: TimerKind, deadline: DateTime<Local>) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.handle.kind == kind) {
            timer.deadline = deadline;
        }
    }

    /// Take the earliest timer due at or before `limit`.
    ///
    /// Ties fire in scheduling order. A repeating timer is re-armed one
    /// period after the deadline it fired for; a one-shot timer is removed.
    /// Returns the handle and the deadline it fired for.
    pub fn pop_due(&mut self, limit: DateTime<Local>) -> Option<(TimerHandle, DateTime<Local>)> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= limit)
            .min_by_key(|(_, t)| (t.deadline, t.handle.id))
            .map(|(i, _)| i)?;

        let fired = self.timers.get_mut(index)?;
        let handle = fired.handle;
        let deadline = fired.deadline;
        let period = fired.period;

        match period {
            Some(period) => fired.deadline = deadline + period,
            None => {
                self.timers.swap_remove(index);
            }
        }

        Some((handle, deadline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerSet::new();
        let handle = timers.schedule_once(TimerKind::BreakEnd, t0() + Duration::minutes(5));

        assert!(timers.pop_due(t0() + Duration::minutes(4)).is_none());

        let (fired, at) = timers.pop_due(t0() + Duration::minutes(10)).unwrap();
        assert_eq!(fired, handle);
        assert_eq!(at, t0() + Duration::minutes(5));
        assert!(timers.pop_due(t0() + Duration::minutes(10)).is_none());
        assert!(timers.next_deadline().is_none());
    }

    #[test]
    fn test_repeating_rearms_without_drift() {
        let mut timers = TimerSet::new();
        let period = Duration::minutes(1);
        timers.schedule_repeating(TimerKind::Tick, t0() + period, period);

        let mut fired = Vec::new();
        while let Some((_, at)) = timers.pop_due(t0() + Duration::minutes(3)) {
            fired.push(at);
        }

        assert_eq!(
            fired,
            vec![
                t0() + Duration::minutes(1),
                t0() + Duration::minutes(2),
                t0() + Duration::minutes(3)
            ]
        );
        assert_eq!(timers.deadline(TimerKind::Tick), Some(t0() + Duration::minutes(4)));
    }

    #[test]
    fn test_pop_due_orders_by_deadline_then_schedule_order() {
        let mut timers = TimerSet::new();
        let late = timers.schedule_once(TimerKind::ExerciseEnd, t0() + Duration::seconds(90));
        let early = timers.schedule_once(TimerKind::BreakEnd, t0() + Duration::seconds(30));
        let tie = timers.schedule_repeating(
            TimerKind::Tick,
            t0() + Duration::seconds(90),
            Duration::minutes(1),
        );

        let limit = t0() + Duration::seconds(90);
        assert_eq!(timers.pop_due(limit).unwrap().0, early);
        assert_eq!(timers.pop_due(limit).unwrap().0, late);
        assert_eq!(timers.pop_due(limit).unwrap().0, tie);
        assert!(timers.pop_due(limit).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerSet::new();
        let handle = timers.schedule_once(TimerKind::ExerciseEnd, t0());

        assert!(timers.is_armed(handle));
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.deadline(TimerKind::ExerciseEnd).is_none());
    }

    #[test]
    fn test_stale_handle_does_not_cancel_replacement() {
        let mut timers = TimerSet::new();
        let old = timers.schedule_once(TimerKind::BreakEnd, t0());
        let new = timers.schedule_once(TimerKind::BreakEnd, t0() + Duration::minutes(5));

        assert_eq!(timers.next_deadline(), Some(t0() + Duration::minutes(5)));
        assert!(!timers.cancel(old));
        assert!(timers.is_armed(new));
        assert_eq!(new.kind(), TimerKind::BreakEnd);
    }

    #[test]
    fn test_next_deadline_and_reschedule() {
        let mut timers = TimerSet::new();
        assert!(timers.next_deadline().is_none());

        timers.schedule_repeating(TimerKind::Tick, t0() + Duration::minutes(1), Duration::minutes(1));
        timers.schedule_once(TimerKind::BreakEnd, t0() + Duration::minutes(5));
        assert_eq!(timers.next_deadline(), Some(t0() + Duration::minutes(1)));

        timers.reschedule(TimerKind::Tick, t0() + Duration::minutes(9));
        assert_eq!(timers.next_deadline(), Some(t0() + Duration::minutes(5)));
    }
}
