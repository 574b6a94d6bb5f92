//! Terminal dashboard for visioncare.
//!
//! Runs a live session: screen time accrues while the dashboard is open,
//! breaks and exercises count down on screen. Built with ratatui and
//! crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{map_key, Action};

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::core::{ClockSource, SystemClock};
use crate::error::VisionError;
use crate::features::session::SessionOptions;
use crate::storage::{PersistenceStore, SqliteStore};

/// How long to wait for a key press between redraws.
const INPUT_TIMEOUT: Duration = Duration::from_millis(100);

/// Run the dashboard until the user quits.
///
/// Returns a one-line summary to print afterwards.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or run.
pub fn run(store: SqliteStore, options: SessionOptions) -> Result<String, VisionError> {
    // Setup terminal
    enable_raw_mode().map_err(|e| VisionError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| VisionError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| VisionError::Config(format!("Failed to create terminal: {e}")))?;

    let mut app = App::new(store, SystemClock, options);
    let result = run_app(&mut terminal, &mut app);
    app.quit();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.summary())
}

/// Run the main application loop.
fn run_app<B, S, C>(terminal: &mut Terminal<B>, app: &mut App<S, C>) -> Result<(), VisionError>
where
    B: Backend,
    S: PersistenceStore,
    C: ClockSource,
{
    while !app.should_quit {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| VisionError::Config(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(INPUT_TIMEOUT)? {
            app.apply(action);
        }
        app.tick();
    }

    Ok(())
}
