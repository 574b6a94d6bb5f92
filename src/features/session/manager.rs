//! The session state machine.
//!
//! [`SessionManager`] owns screen time accrual, break scheduling and
//! exercise timing. Three sub-machines share one clock:
//!
//! - tracking/break: `Tracking`, `OnBreak`, `Idle`
//! - exercise: `Idle`, `Exercising`
//! - the data commands (daily reset, policy, health log, checkup date)
//!
//! Commands never fail on state: calling one from the wrong state returns
//! [`Transition::Ignored`] and changes nothing. Every applied transition
//! writes the full snapshot to the store, then emits at most one
//! notification.

use chrono::{DateTime, Duration, Local, NaiveDate};

use super::exercise::Exercise;
use super::health::{HealthLog, HealthLogEntry};
use super::model::{BreakPolicy, BreakPolicyUpdate, ScreenTimeCounter, Snapshot};
use super::timer::{TimerHandle, TimerKind, TimerSet};
use crate::config::Config;
use crate::core::{ClockSource, Notification, NotificationKind, NotificationSink};
use crate::error::VisionError;
use crate::storage::PersistenceStore;

/// Slack for floating point accrual when comparing against break thresholds.
const ACCRUAL_EPSILON: f64 = 1e-9;

/// Longest accepted tick period, one day.
pub const MAX_TICK_SECONDS: u64 = 86_400;

/// Tick period for `seconds`, clamped to `1..=MAX_TICK_SECONDS`.
#[must_use]
pub fn tick_period(seconds: u64) -> Duration {
    let clamped = seconds.clamp(1, MAX_TICK_SECONDS);
    if clamped != seconds {
        log::warn!("Tick period of {seconds}s is out of range, using {clamped}s");
    }
    Duration::seconds(i64::try_from(clamped).unwrap_or(60))
}

/// Session behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    /// Time between accrual ticks. Each tick accrues its length in minutes.
    pub tick_period: Duration,
    /// Start tracking on construction.
    pub auto_start: bool,
    /// Reset the daily counter when the local date changes.
    pub day_rollover: bool,
    /// Break policy used when none is stored.
    pub default_policy: BreakPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::seconds(60),
            auto_start: true,
            day_rollover: true,
            default_policy: BreakPolicy::default(),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        let configured = BreakPolicy {
            interval_minutes: config.breaks.interval_minutes,
            duration_minutes: config.breaks.duration_minutes,
            enabled: config.breaks.enabled,
        };
        let default_policy = match configured.validate() {
            Ok(()) => configured,
            Err(e) => {
                log::warn!("Ignoring configured break policy: {e}");
                BreakPolicy::default()
            }
        };

        Self {
            tick_period: tick_period(config.session.tick_seconds),
            auto_start: config.session.auto_start,
            day_rollover: config.session.day_rollover,
            default_policy,
        }
    }
}

/// Outcome of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; the snapshot was written.
    Applied,
    /// The command did not apply in the current state; nothing changed.
    Ignored,
}

impl Transition {
    /// Whether state changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

#[derive(Debug, Clone, Copy)]
enum BreakReason {
    Scheduled,
    Manual,
}

/// Owner of all session state and the timers driving it.
pub struct SessionManager<S, N, C> {
    store: S,
    notifier: N,
    clock: C,
    options: SessionOptions,

    screen_time: ScreenTimeCounter,
    policy: BreakPolicy,
    is_tracking: bool,
    is_on_break: bool,
    active_exercise: Option<Exercise>,
    health_logs: HealthLog,
    next_checkup_date: Option<NaiveDate>,

    timers: TimerSet,
    tick: Option<TimerHandle>,
    break_end: Option<TimerHandle>,
    exercise_end: Option<TimerHandle>,
    /// Highest break threshold multiple already acted on.
    last_break_multiple: u64,
    /// Logical time: the latest instant processed.
    now: DateTime<Local>,
    degraded: bool,
}

impl<S, N, C> SessionManager<S, N, C>
where
    S: PersistenceStore,
    N: NotificationSink,
    C: ClockSource,
{
    /// Restore state from `store` and start the session.
    ///
    /// Breaks and exercises interrupted by a previous exit are not resumed.
    /// Tracking starts immediately unless `options.auto_start` is off.
    pub fn new(store: S, notifier: N, clock: C, mut options: SessionOptions) -> Self {
        if options.tick_period <= Duration::zero() {
            log::warn!("Tick period must be positive, using one second");
            options.tick_period = Duration::seconds(1);
        }

        let now = clock.now();
        let snapshot = Snapshot::load(&store, now.date_naive(), options.default_policy);
        if snapshot.is_on_break || snapshot.is_exercising {
            log::debug!("Discarding break/exercise interrupted by the previous exit");
        }

        let mut manager = Self {
            store,
            notifier,
            clock,
            options,
            screen_time: snapshot.screen_time,
            policy: snapshot.break_policy,
            is_tracking: false,
            is_on_break: false,
            active_exercise: None,
            health_logs: HealthLog::from_entries(snapshot.health_logs),
            next_checkup_date: snapshot.next_checkup_date,
            timers: TimerSet::new(),
            tick: None,
            break_end: None,
            exercise_end: None,
            last_break_multiple: 0,
            now,
            degraded: false,
        };

        if manager.options.day_rollover {
            manager.roll_over();
        }
        if manager.options.auto_start {
            manager.start_tracking();
        }

        manager
    }

    // ── Tracking / break ───────────────────────────────────────────────

    /// `Idle → Tracking`. Ignored while tracking or on a break.
    pub fn start_tracking(&mut self) -> Transition {
        self.sync_clock();
        if self.is_tracking || self.is_on_break {
            return Transition::Ignored;
        }

        self.resume_tracking();
        log::debug!("Tracking started");
        self.persist();
        Transition::Applied
    }

    /// `Tracking → Idle`. Ignored unless tracking.
    pub fn stop_tracking(&mut self) -> Transition {
        self.sync_clock();
        if !self.is_tracking {
            return Transition::Ignored;
        }

        self.halt_tracking();
        log::debug!("Tracking stopped");
        self.persist();
        Transition::Applied
    }

    /// `Tracking → OnBreak`. Ignored unless tracking.
    pub fn start_break(&mut self) -> Transition {
        self.sync_clock();
        if !self.is_tracking {
            return Transition::Ignored;
        }

        self.begin_break(BreakReason::Manual);
        Transition::Applied
    }

    /// `OnBreak → Tracking`, before the break timer runs out. Ignored unless on a break.
    pub fn end_break(&mut self) -> Transition {
        self.sync_clock();
        if !self.is_on_break {
            return Transition::Ignored;
        }

        if let Some(handle) = self.break_end.take() {
            self.timers.cancel(handle);
        }
        self.finish_break();
        Transition::Applied
    }

    // ── Exercise ───────────────────────────────────────────────────────

    /// Begin `exercise`; it ends by itself after its duration. Ignored while exercising.
    pub fn start_exercise(&mut self, exercise: &Exercise) -> Transition {
        self.sync_clock();
        if self.active_exercise.is_some() {
            return Transition::Ignored;
        }

        let deadline = self.now + Duration::seconds(i64::from(exercise.duration_seconds));
        self.exercise_end = Some(self.timers.schedule_once(TimerKind::ExerciseEnd, deadline));
        self.active_exercise = Some(exercise.clone());
        log::debug!("Exercise {} started", exercise.id);

        self.persist();
        self.notify(
            NotificationKind::ExerciseStarted,
            format!("Exercise: {}", exercise.name),
            exercise.description.clone(),
        );
        Transition::Applied
    }

    /// Stop the current exercise early. Ignored unless exercising.
    pub fn end_exercise(&mut self) -> Transition {
        self.sync_clock();
        if self.active_exercise.is_none() {
            return Transition::Ignored;
        }

        if let Some(handle) = self.exercise_end.take() {
            self.timers.cancel(handle);
        }
        self.finish_exercise();
        Transition::Applied
    }

    // ── Data commands ──────────────────────────────────────────────────

    /// Zero today's screen time. Weekly buckets and health logs are kept.
    pub fn reset_daily_stats(&mut self) -> Transition {
        self.sync_clock();
        self.screen_time.daily_minutes = 0.0;
        self.last_break_multiple = 0;
        log::debug!("Daily stats reset");

        self.persist();
        self.notify(
            NotificationKind::DailyReset,
            "Daily stats reset".to_string(),
            "Today's screen time starts again from zero.".to_string(),
        );
        Transition::Applied
    }

    /// Change some or all of the break policy.
    ///
    /// # Errors
    ///
    /// Returns `VisionError::InvalidInput` if the merged policy is out of
    /// range; the current policy is kept.
    pub fn update_break_policy(
        &mut self,
        update: BreakPolicyUpdate,
    ) -> Result<Transition, VisionError> {
        self.sync_clock();
        let merged = self.policy.merged(update);
        merged.validate()?;
        if merged == self.policy {
            return Ok(Transition::Ignored);
        }

        self.policy = merged;
        // Thresholds already passed under the old interval do not fire.
        self.last_break_multiple = self.current_multiple();
        log::debug!("Break policy updated: {merged:?}");

        self.persist();
        Ok(Transition::Applied)
    }

    /// Record a symptom entry, stamped with today's screen time.
    pub fn add_health_log_entry(&mut self, mut entry: HealthLogEntry) -> Transition {
        self.sync_clock();
        entry.screen_time_hours_at_logging = self.screen_time.daily_hours();
        if let Some(evicted) = self.health_logs.push(entry) {
            log::debug!("Health log full, evicted entry {}", evicted.id);
        }

        self.persist();
        Transition::Applied
    }

    /// Set or clear the next eye checkup date.
    pub fn set_next_checkup_date(&mut self, date: Option<NaiveDate>) -> Transition {
        self.sync_clock();
        if self.next_checkup_date == date {
            return Transition::Ignored;
        }

        self.next_checkup_date = date;
        self.persist();
        Transition::Applied
    }

    // ── Driving time ───────────────────────────────────────────────────

    /// Process every timer due by the clock's current time.
    ///
    /// If the host was suspended for longer than a tick period, the missed
    /// ticks are dropped and a single tick fires, so suspended time is not
    /// counted as screen time. Returns the number of timers fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        self.run_until(now, true)
    }

    /// Process every timer due up to `target`, each at its own deadline.
    ///
    /// This is exact simulation: no ticks are skipped. Returns the number
    /// of timers fired.
    pub fn advance_to(&mut self, target: DateTime<Local>) -> usize {
        self.run_until(target, false)
    }

    /// [`advance_to`](Self::advance_to) `by` past the current logical time.
    pub fn advance_by(&mut self, by: Duration) -> usize {
        self.advance_to(self.now + by)
    }

    /// When the next timer is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Local>> {
        self.timers.next_deadline()
    }

    // ── Observers ──────────────────────────────────────────────────────

    #[must_use]
    pub const fn screen_time(&self) -> &ScreenTimeCounter {
        &self.screen_time
    }

    #[must_use]
    pub const fn break_policy(&self) -> BreakPolicy {
        self.policy
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    #[must_use]
    pub const fn is_on_break(&self) -> bool {
        self.is_on_break
    }

    /// Health log entries, newest first.
    #[must_use]
    pub fn health_logs(&self) -> &[HealthLogEntry] {
        self.health_logs.entries()
    }

    #[must_use]
    pub const fn active_exercise(&self) -> Option<&Exercise> {
        self.active_exercise.as_ref()
    }

    #[must_use]
    pub const fn is_exercising(&self) -> bool {
        self.active_exercise.is_some()
    }

    #[must_use]
    pub const fn next_checkup_date(&self) -> Option<NaiveDate> {
        self.next_checkup_date
    }

    /// Logical time of the last processed event.
    #[must_use]
    pub const fn now(&self) -> DateTime<Local> {
        self.now
    }

    /// Whether persistence failed and state is in memory only.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Time left in the current break.
    #[must_use]
    pub fn break_remaining(&self) -> Option<Duration> {
        self.remaining(self.break_end)
    }

    /// Time left in the current exercise.
    #[must_use]
    pub fn exercise_remaining(&self) -> Option<Duration> {
        self.remaining(self.exercise_end)
    }

    /// Screen time minutes until the next scheduled break, while tracking.
    #[must_use]
    pub fn minutes_until_break(&self) -> Option<f64> {
        if !self.is_tracking || !self.policy.enabled {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let next_threshold =
            (self.last_break_multiple + 1) as f64 * f64::from(self.policy.interval_minutes);
        Some((next_threshold - self.screen_time.daily_minutes).max(0.0))
    }

    /// Serializable copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            screen_time: self.screen_time.clone(),
            break_policy: self.policy,
            is_tracking: self.is_tracking,
            is_on_break: self.is_on_break,
            health_logs: self.health_logs.entries().to_vec(),
            active_exercise: self.active_exercise.clone(),
            is_exercising: self.is_exercising(),
            next_checkup_date: self.next_checkup_date,
        }
    }

    /// The persistence collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The notification collaborator.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notification collaborator, e.g. to drain a queue.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Fire due timers up to `target` in deadline order.
    ///
    /// With `skip_missed`, the tick is re-checked before every timer, so a
    /// tick armed during the catch-up (a break ending at its old deadline)
    /// cannot replay the suspended span.
    fn run_until(&mut self, target: DateTime<Local>, skip_missed: bool) -> usize {
        let mut fired = 0;
        loop {
            if skip_missed {
                self.skip_missed_ticks(target);
            }
            let Some((handle, at)) = self.timers.pop_due(target) else {
                break;
            };
            if at > self.now {
                self.now = at;
            }
            self.fire(handle);
            fired += 1;
        }

        if target > self.now {
            self.now = target;
        }
        fired
    }

    /// Catch up with the wall clock before a command runs.
    fn sync_clock(&mut self) {
        let now = self.clock.now();
        if now > self.now {
            self.run_until(now, true);
        }
    }

    fn skip_missed_ticks(&mut self, now: DateTime<Local>) {
        let Some(deadline) = self.timers.deadline(TimerKind::Tick) else {
            return;
        };
        let period_ms = self.options.tick_period.num_milliseconds().max(1);
        let overdue_ms = (now - deadline).num_milliseconds();
        if overdue_ms <= period_ms {
            return;
        }

        log::warn!(
            "Clock jumped {}s ahead, skipping {} missed ticks",
            overdue_ms / 1000,
            overdue_ms / period_ms
        );
        let resume = now - Duration::milliseconds(overdue_ms % period_ms);
        self.timers.reschedule(TimerKind::Tick, resume);
    }

    fn fire(&mut self, handle: TimerHandle) {
        match handle.kind() {
            TimerKind::Tick if self.tick == Some(handle) => self.on_tick(),
            TimerKind::BreakEnd if self.break_end == Some(handle) => {
                self.break_end = None;
                self.finish_break();
            }
            TimerKind::ExerciseEnd if self.exercise_end == Some(handle) => {
                self.exercise_end = None;
                self.finish_exercise();
            }
            kind => log::warn!("Dropping stale {kind:?} timer"),
        }
    }

    /// Accrue, check the break threshold, then start a break if due.
    fn on_tick(&mut self) {
        if self.options.day_rollover {
            self.roll_over();
        }
        let at = self.now;
        self.screen_time.accrue(self.minutes_per_tick(), at);

        if self.break_due() {
            self.begin_break(BreakReason::Scheduled);
        } else {
            self.persist();
        }
    }

    fn roll_over(&mut self) {
        let today = self.now.date_naive();
        if self.screen_time.roll_over(today) {
            self.last_break_multiple = 0;
            log::info!("New day {today}: daily screen time reset");
        }
    }

    fn break_due(&mut self) -> bool {
        if !self.policy.enabled {
            return false;
        }
        let multiple = self.current_multiple();
        if multiple > self.last_break_multiple {
            self.last_break_multiple = multiple;
            true
        } else {
            false
        }
    }

    /// How many whole break intervals today's screen time covers.
    fn current_multiple(&self) -> u64 {
        let interval = f64::from(self.policy.interval_minutes.max(1));
        let covered = ((self.screen_time.daily_minutes + ACCRUAL_EPSILON) / interval).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let multiple = covered.max(0.0) as u64;
        multiple
    }

    fn minutes_per_tick(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let millis = self.options.tick_period.num_milliseconds() as f64;
        millis / 60_000.0
    }

    fn resume_tracking(&mut self) {
        let period = self.options.tick_period;
        self.tick = Some(
            self.timers
                .schedule_repeating(TimerKind::Tick, self.now + period, period),
        );
        self.is_tracking = true;
        self.last_break_multiple = self.current_multiple();
    }

    fn halt_tracking(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.timers.cancel(handle);
        }
        self.is_tracking = false;
    }

    fn begin_break(&mut self, reason: BreakReason) {
        self.halt_tracking();
        self.is_on_break = true;

        let minutes = self.policy.duration_minutes;
        let deadline = self.now + Duration::minutes(i64::from(minutes));
        self.break_end = Some(self.timers.schedule_once(TimerKind::BreakEnd, deadline));
        log::debug!("Break started ({reason:?}), ends at {deadline}");

        self.persist();
        let body = match reason {
            BreakReason::Scheduled => format!(
                "You've been at the screen for {} minutes. Look away and rest your eyes for {minutes} minutes.",
                self.policy.interval_minutes
            ),
            BreakReason::Manual => format!("Rest your eyes for {minutes} minutes."),
        };
        self.notify(
            NotificationKind::BreakStarted,
            "Time for an eye break".to_string(),
            body,
        );
    }

    fn finish_break(&mut self) {
        self.is_on_break = false;
        self.resume_tracking();
        log::debug!("Break ended, tracking resumed");

        self.persist();
        self.notify(
            NotificationKind::BreakEnded,
            "Break over".to_string(),
            "Welcome back! Screen time tracking has resumed.".to_string(),
        );
    }

    fn finish_exercise(&mut self) {
        let name = self
            .active_exercise
            .take()
            .map_or_else(String::new, |exercise| exercise.name);
        log::debug!("Exercise {name} complete");

        self.persist();
        self.notify(
            NotificationKind::ExerciseComplete,
            "Exercise complete".to_string(),
            format!("Nice work finishing {name}."),
        );
    }

    fn remaining(&self, handle: Option<TimerHandle>) -> Option<Duration> {
        let deadline = self.timers.deadline(handle?.kind())?;
        Some((deadline - self.now).max(Duration::zero()))
    }

    fn notify(&mut self, kind: NotificationKind, title: String, body: String) {
        self.notifier.notify(&Notification::new(kind, title, body));
    }

    fn persist(&mut self) {
        self.check_invariants();
        if self.degraded {
            return;
        }

        let result = self
            .snapshot()
            .to_entries()
            .and_then(|entries| self.store.save_all(&entries));

        if let Err(e) = result {
            log::warn!("Could not save session state, continuing in memory only: {e}");
            self.degraded = true;
            self.notify(
                NotificationKind::StorageUnavailable,
                "Storage unavailable".to_string(),
                "Changes are kept until VisionCare exits but will not be saved.".to_string(),
            );
        }
    }

    fn check_invariants(&self) {
        let armed = |handle: Option<TimerHandle>| handle.is_some_and(|h| self.timers.is_armed(h));

        debug_assert!(
            !(self.is_tracking && self.is_on_break),
            "tracking and on break at once"
        );
        debug_assert_eq!(self.is_tracking, armed(self.tick), "tick timer out of sync");
        debug_assert_eq!(self.is_on_break, armed(self.break_end), "break timer out of sync");
        debug_assert_eq!(
            self.active_exercise.is_some(),
            armed(self.exercise_end),
            "exercise timer out of sync"
        );
    }
}
