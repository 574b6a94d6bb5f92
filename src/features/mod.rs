//! Feature implementations for visioncare.
//!
//! - Session: screen time tracking, breaks, exercises, health log

pub mod session;
