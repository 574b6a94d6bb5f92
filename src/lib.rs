//! visioncare - Screen time and eye care in the terminal
//!
//! This crate tracks screen time, schedules eye breaks, times guided eye
//! exercises and keeps a small symptom log. The core is a single-threaded
//! state machine driven by simulated-time timers.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::VisionError;
pub use features::session::{SessionManager, SessionOptions, Transition};
