//! Break policy commands.

use crate::cli::args::PolicyCommands;
use crate::error::VisionError;
use crate::features::session::BreakPolicyUpdate;
use crate::output::format_policy;

use super::Context;

/// Execute policy subcommands.
///
/// # Errors
///
/// Returns an error if the new policy is out of range or cannot be saved.
pub fn policy(ctx: &Context, cmd: Option<PolicyCommands>) -> Result<String, VisionError> {
    match cmd.unwrap_or(PolicyCommands::Show) {
        PolicyCommands::Show => {
            let snapshot = ctx.load_snapshot()?;
            format_policy(&snapshot.break_policy, ctx.format)
        }

        PolicyCommands::Set {
            interval,
            duration,
            enable,
            disable,
        } => {
            let enabled = match (enable, disable) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let update = BreakPolicyUpdate {
                interval_minutes: interval,
                duration_minutes: duration,
                enabled,
            };
            if update.is_empty() {
                return Err(VisionError::InvalidInput(
                    "Nothing to change. Pass --interval, --duration, --enable or --disable."
                        .to_string(),
                ));
            }

            let mut session = ctx.open_session()?;
            session.update_break_policy(update)?;
            ctx.ensure_saved(&session)?;
            format_policy(&session.break_policy(), ctx.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::cli::commands::context::test_support::temp_context;

    #[test]
    fn test_policy_set_persists() {
        let (_dir, ctx) = temp_context(OutputFormat::Json);

        policy(
            &ctx,
            Some(PolicyCommands::Set {
                interval: Some(30),
                duration: None,
                enable: false,
                disable: true,
            }),
        )
        .unwrap();

        let snapshot = ctx.load_snapshot().unwrap();
        assert_eq!(snapshot.break_policy.interval_minutes, 30);
        assert_eq!(snapshot.break_policy.duration_minutes, 5);
        assert!(!snapshot.break_policy.enabled);
    }

    #[test]
    fn test_policy_set_rejects_out_of_range() {
        let (_dir, ctx) = temp_context(OutputFormat::Pretty);

        let err = policy(
            &ctx,
            Some(PolicyCommands::Set {
                interval: Some(0),
                duration: None,
                enable: false,
                disable: false,
            }),
        )
        .unwrap_err();

        assert!(matches!(err, VisionError::InvalidInput(_)));
        assert_eq!(ctx.load_snapshot().unwrap().break_policy.interval_minutes, 20);
    }

    #[test]
    fn test_policy_set_requires_a_change() {
        let (_dir, ctx) = temp_context(OutputFormat::Pretty);

        let result = policy(
            &ctx,
            Some(PolicyCommands::Set {
                interval: None,
                duration: None,
                enable: false,
                disable: false,
            }),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_policy_show_json() {
        let (_dir, ctx) = temp_context(OutputFormat::Json);
        let output = policy(&ctx, None).unwrap();

        assert!(output.contains("\"interval_minutes\": 20"));
        assert!(output.contains("\"enabled\": true"));
    }
}
