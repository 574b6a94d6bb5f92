//! User-visible notifications.

use std::collections::VecDeque;

use serde::Serialize;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A break began, either scheduled or manual.
    BreakStarted,
    /// A break finished and tracking resumed.
    BreakEnded,
    /// A guided exercise began.
    ExerciseStarted,
    /// A guided exercise finished.
    ExerciseComplete,
    /// Today's screen time was reset.
    DailyReset,
    /// Persistence failed; state is kept in memory only.
    StorageUnavailable,
}

/// A `(title, body)` alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// What this is about.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Longer description.
    pub body: String,
}

impl Notification {
    /// Build a notification.
    pub fn new(kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Receiver of user-visible alerts.
///
/// How an alert is shown (toast, log line, terminal banner) is up to the
/// implementation.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    /// Deliver one notification.
    fn notify(&mut self, notification: &Notification);
}

/// Buffers notifications until the host drains them.
#[derive(Debug, Default, Clone)]
pub struct QueueNotifier {
    pending: VecDeque<Notification>,
}

impl QueueNotifier {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    /// Buffered notifications, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    /// Count buffered notifications of one kind.
    #[must_use]
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.pending.iter().filter(|n| n.kind == kind).count()
    }
}

impl NotificationSink for QueueNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.pending.push_back(notification.clone());
    }
}
