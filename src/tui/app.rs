//! Application state for the dashboard.

use std::collections::VecDeque;

use crate::core::{ClockSource, Notification, QueueNotifier};
use crate::features::session::{exercise, Exercise, SessionManager, SessionOptions, Transition};
use crate::output::{format_countdown, format_minutes};
use crate::storage::PersistenceStore;
use crate::tui::event::Action;

/// Notifications kept on screen.
const MAX_MESSAGES: usize = 6;

/// Key help shown in the status bar.
pub const HELP: &str =
    "space:track | b:break | e:end break | x:exercise | n/p:select | s:stop exercise | r:reset | q:quit";

/// Application state.
pub struct App<S, C> {
    /// The live session.
    pub session: SessionManager<S, QueueNotifier, C>,
    /// Exercise catalog.
    pub exercises: Vec<Exercise>,
    /// Currently selected exercise.
    pub selected: usize,
    /// Recent notifications, oldest first.
    pub messages: VecDeque<Notification>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl<S, C> App<S, C>
where
    S: PersistenceStore,
    C: ClockSource,
{
    /// Create a new app instance and start the session.
    pub fn new(store: S, clock: C, options: SessionOptions) -> Self {
        let mut app = Self {
            session: SessionManager::new(store, QueueNotifier::new(), clock, options),
            exercises: exercise::catalog(),
            selected: 0,
            messages: VecDeque::new(),
            status: None,
            should_quit: false,
        };
        app.collect_notifications();
        app
    }

    /// Fire due timers and pick up their notifications.
    pub fn tick(&mut self) {
        self.session.poll();
        self.collect_notifications();
    }

    fn collect_notifications(&mut self) {
        for notification in self.session.notifier_mut().drain() {
            self.messages.push_back(notification);
            if self.messages.len() > MAX_MESSAGES {
                self.messages.pop_front();
            }
        }
    }

    /// Get the currently selected exercise.
    #[must_use]
    pub fn selected_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.selected)
    }

    /// Move selection down, wrapping around.
    pub fn select_next(&mut self) {
        if !self.exercises.is_empty() {
            self.selected = (self.selected + 1) % self.exercises.len();
        }
    }

    /// Move selection up, wrapping around.
    pub fn select_previous(&mut self) {
        if !self.exercises.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.exercises.len() - 1);
        }
    }

    /// Apply a user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::ToggleTracking => {
                if self.session.is_tracking() {
                    let t = self.session.stop_tracking();
                    self.report(t, "Tracking paused", "");
                } else {
                    let t = self.session.start_tracking();
                    self.report(t, "Tracking", "Tracking resumes when the break ends");
                }
            }
            Action::StartBreak => {
                let t = self.session.start_break();
                self.report(t, "Break started", "Breaks start from tracking");
            }
            Action::EndBreak => {
                let t = self.session.end_break();
                self.report(t, "Break ended early", "Not on a break");
            }
            Action::StartExercise => {
                if let Some(exercise) = self.selected_exercise().cloned() {
                    let t = self.session.start_exercise(&exercise);
                    self.report(t, "Exercise started", "An exercise is already running");
                }
            }
            Action::StopExercise => {
                let t = self.session.end_exercise();
                self.report(t, "Exercise stopped", "No exercise running");
            }
            Action::NextExercise => self.select_next(),
            Action::PreviousExercise => self.select_previous(),
            Action::Reset => {
                let t = self.session.reset_daily_stats();
                self.report(t, "Today's screen time reset", "");
            }
            Action::Help => self.status = Some(HELP.to_string()),
        }
        self.collect_notifications();
    }

    fn report(&mut self, transition: Transition, applied: &str, ignored: &str) {
        self.status = match transition {
            Transition::Applied => Some(applied.to_string()),
            Transition::Ignored if ignored.is_empty() => None,
            Transition::Ignored => Some(ignored.to_string()),
        };
    }

    /// Stop tracking and flag the main loop to exit.
    pub fn quit(&mut self) {
        self.session.stop_tracking();
        self.should_quit = true;
    }

    /// Short state label for the header.
    #[must_use]
    pub const fn state_label(&self) -> &'static str {
        if self.session.is_on_break() {
            "ON BREAK"
        } else if self.session.is_tracking() {
            "TRACKING"
        } else {
            "PAUSED"
        }
    }

    /// Progress toward the next break, or through the current one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn break_gauge(&self) -> (f64, String) {
        let policy = self.session.break_policy();

        if let Some(remaining) = self.session.break_remaining() {
            let total = f64::from(policy.duration_minutes) * 60.0;
            let left = remaining.num_seconds() as f64;
            let ratio = if total > 0.0 { 1.0 - left / total } else { 1.0 };
            return (
                ratio.clamp(0.0, 1.0),
                format!("Break: {} left, look away", format_countdown(remaining)),
            );
        }

        match self.session.minutes_until_break() {
            Some(until) => {
                let interval = f64::from(policy.interval_minutes);
                (
                    (1.0 - until / interval).clamp(0.0, 1.0),
                    format!("Next break in {}", format_minutes(until)),
                )
            }
            None if !policy.enabled => (0.0, "Automatic breaks off".to_string()),
            None => (0.0, "Paused".to_string()),
        }
    }

    /// Progress through the running exercise.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn exercise_gauge(&self) -> Option<(f64, String)> {
        let exercise = self.session.active_exercise()?;
        let remaining = self.session.exercise_remaining()?;
        let total = f64::from(exercise.duration_seconds);
        let ratio = if total > 0.0 {
            1.0 - remaining.num_seconds() as f64 / total
        } else {
            1.0
        };
        Some((
            ratio.clamp(0.0, 1.0),
            format!("{}: {}", exercise.name, format_countdown(remaining)),
        ))
    }

    /// One line summarizing the session, printed after the dashboard closes.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Screen time today: {}",
            format_minutes(self.session.screen_time().daily_minutes)
        );
        if self.session.is_degraded() {
            line.push_str(" (changes were not saved)");
        }
        line
    }
}
