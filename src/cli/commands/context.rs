//! Shared state for one CLI invocation.

use chrono::{Local, NaiveDate};
use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::core::{Notification, NotificationKind, NotificationSink, SystemClock};
use crate::error::VisionError;
use crate::features::session::{SessionManager, SessionOptions, Snapshot};
use crate::storage::SqliteStore;

/// A session manager for one-shot commands.
pub type CliSession = SessionManager<SqliteStore, ConsoleNotifier, SystemClock>;

/// Prints notifications to stderr so stdout stays parseable.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&mut self, notification: &Notification) {
        let title = match notification.kind {
            NotificationKind::StorageUnavailable => notification.title.red().bold(),
            NotificationKind::BreakStarted => notification.title.yellow().bold(),
            _ => notification.title.cyan().bold(),
        };
        eprintln!("{title} {}", notification.body);
    }
}

/// Resolved paths, configuration and output format.
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub format: OutputFormat,
}

impl Context {
    /// Bundle what every command needs.
    #[must_use]
    pub const fn new(paths: Paths, config: Config, format: OutputFormat) -> Self {
        Self {
            paths,
            config,
            format,
        }
    }

    /// Today's local date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Open the state database, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created.
    pub fn open_store(&self) -> Result<SqliteStore, VisionError> {
        self.paths.ensure_dirs()?;
        SqliteStore::open(&self.paths.database)
    }

    /// Session options from the config file.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::from(&self.config)
    }

    /// Read the saved snapshot without starting a session.
    ///
    /// A stale day is rolled over on the returned copy only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn load_snapshot(&self) -> Result<Snapshot, VisionError> {
        let store = self.open_store()?;
        let options = self.session_options();
        let today = self.today();

        let mut snapshot = Snapshot::load(&store, today, options.default_policy);
        if options.day_rollover {
            snapshot.screen_time.roll_over(today);
        }
        Ok(snapshot)
    }

    /// Open a session for a one-shot command. Tracking is not started.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open_session(&self) -> Result<CliSession, VisionError> {
        let mut options = self.session_options();
        options.auto_start = false;
        Ok(SessionManager::new(
            self.open_store()?,
            ConsoleNotifier,
            SystemClock,
            options,
        ))
    }

    /// Fail if the session could not write its changes.
    ///
    /// # Errors
    ///
    /// Returns `VisionError::Database` if the session degraded to memory only.
    pub fn ensure_saved(&self, session: &CliSession) -> Result<(), VisionError> {
        if session.is_degraded() {
            return Err(VisionError::Database(format!(
                "Could not save changes to {}",
                self.paths.database.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// A context rooted in a fresh temporary directory.
    pub fn temp_context(format: OutputFormat) -> (TempDir, Context) {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        (temp_dir, Context::new(paths, Config::default(), format))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temp_context;
    use super::*;

    #[test]
    fn test_open_session_does_not_start_tracking() {
        let (_dir, ctx) = temp_context(OutputFormat::Pretty);
        let session = ctx.open_session().unwrap();

        assert!(!session.is_tracking());
        assert!(ctx.ensure_saved(&session).is_ok());
        assert!(ctx.paths.database.exists());
    }

    #[test]
    fn test_load_snapshot_uses_config_policy() {
        let (_dir, mut ctx) = temp_context(OutputFormat::Pretty);
        ctx.config.breaks.interval_minutes = 45;

        let snapshot = ctx.load_snapshot().unwrap();

        assert_eq!(snapshot.break_policy.interval_minutes, 45);
        assert_eq!(snapshot.screen_time.daily_minutes, 0.0);
    }
}
