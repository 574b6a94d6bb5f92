//! Command implementations for visioncare.
//!
//! This module contains the implementation of all CLI commands.

mod checkup;
mod context;
mod exercise;
mod health_log;
mod policy;

pub use checkup::checkup;
pub use context::{CliSession, ConsoleNotifier, Context};
pub use exercise::exercise;
pub use health_log::health_log;
pub use policy::policy;

use clap::CommandFactory;
use clap_complete::Shell;
use colored::Colorize;

use crate::cli::args::{Cli, OutputFormat};
use crate::error::VisionError;
use crate::features::session::{tick_period, WeeklyReport};
use crate::output::{format_report, format_status, format_status_json};

/// Execute status command
///
/// # Errors
///
/// Returns an error if the database cannot be opened or output formatting fails.
pub fn status(ctx: &Context) -> Result<String, VisionError> {
    let snapshot = ctx.load_snapshot()?;
    format_status(&snapshot, ctx.today(), ctx.format)
}

/// Execute reset command
///
/// # Errors
///
/// Returns an error if the reset cannot be saved.
pub fn reset(ctx: &Context) -> Result<String, VisionError> {
    let mut session = ctx.open_session()?;
    session.reset_daily_stats();
    ctx.ensure_saved(&session)?;

    match ctx.format {
        OutputFormat::Json => format_status_json(&session.snapshot()),
        OutputFormat::Pretty => Ok(format!("{} Today's screen time reset", "✓".green())),
    }
}

/// Execute week command
///
/// # Errors
///
/// Returns an error if the database cannot be opened or output formatting fails.
pub fn week(ctx: &Context) -> Result<String, VisionError> {
    let snapshot = ctx.load_snapshot()?;
    let report = WeeklyReport::generate(&snapshot.screen_time);
    format_report(&report, ctx.format)
}

/// Execute run command: the live dashboard
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the terminal fails.
pub fn run(ctx: &Context, tick_seconds: Option<u64>) -> Result<String, VisionError> {
    let mut options = ctx.session_options();
    if let Some(seconds) = tick_seconds {
        options.tick_period = tick_period(seconds);
    }

    let store = ctx.open_store()?;
    let summary = crate::tui::run(store, options)?;
    Ok(summary)
}

/// Generate a shell completion script
///
/// # Errors
///
/// Returns `VisionError::Parse` if the generated script is not UTF-8.
pub fn completions(shell: Shell) -> Result<String, VisionError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "visioncare", &mut buf);
    String::from_utf8(buf).map_err(|e| VisionError::Parse(format!("UTF-8 error: {e}")))
}
