//! Collaborator seams shared by the session core and its hosts.
//!
//! - [`ClockSource`]: wall-clock reads, swappable for simulated time
//! - [`NotificationSink`]: user-visible `(title, body)` alerts

mod clock;
mod notify;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use notify::{Notification, NotificationKind, NotificationSink, QueueNotifier};

#[cfg(test)]
pub use notify::MockNotificationSink;
