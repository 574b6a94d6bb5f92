//! Screen time tracking, breaks and eye exercises.
//!
//! - [`SessionManager`]: the tracking/break/exercise state machine
//! - [`TimerSet`]: simulated-time timers driving it
//! - the data model, exercise catalog, health log and weekly report

pub mod exercise;
pub mod health;
pub mod manager;
pub mod model;
pub mod report;
pub mod timer;

pub use exercise::Exercise;
pub use health::{HealthLog, HealthLogEntry, MAX_HEALTH_LOGS};
pub use manager::{tick_period, SessionManager, SessionOptions, Transition, MAX_TICK_SECONDS};
pub use model::{keys, BreakPolicy, BreakPolicyUpdate, ScreenTimeCounter, Snapshot};
pub use report::{days_until, DayUsage, WeeklyReport};
pub use timer::{TimerHandle, TimerKind, TimerSet};
