//! Checkup date commands.

use crate::cli::args::CheckupCommands;
use crate::error::VisionError;
use crate::output::format_checkup;

use super::Context;

/// Execute checkup subcommands.
///
/// # Errors
///
/// Returns an error if the date cannot be saved.
pub fn checkup(ctx: &Context, cmd: Option<CheckupCommands>) -> Result<String, VisionError> {
    let today = ctx.today();

    let date = match cmd.unwrap_or(CheckupCommands::Show) {
        CheckupCommands::Show => ctx.load_snapshot()?.next_checkup_date,
        CheckupCommands::Set { date } => {
            let mut session = ctx.open_session()?;
            session.set_next_checkup_date(Some(date));
            ctx.ensure_saved(&session)?;
            session.next_checkup_date()
        }
        CheckupCommands::Clear => {
            let mut session = ctx.open_session()?;
            session.set_next_checkup_date(None);
            ctx.ensure_saved(&session)?;
            session.next_checkup_date()
        }
    };

    format_checkup(date, today, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::cli::commands::context::test_support::temp_context;
    use chrono::NaiveDate;

    #[test]
    fn test_checkup_set_show_clear() {
        let (_dir, ctx) = temp_context(OutputFormat::Json);
        let date = NaiveDate::from_ymd_opt(2027, 2, 1).unwrap();

        checkup(&ctx, Some(CheckupCommands::Set { date })).unwrap();
        let shown = checkup(&ctx, None).unwrap();
        assert!(shown.contains("\"next_checkup_date\": \"2027-02-01\""));

        checkup(&ctx, Some(CheckupCommands::Clear)).unwrap();
        assert!(ctx.load_snapshot().unwrap().next_checkup_date.is_none());
    }
}
