//! Exercise catalog commands.

use crate::cli::args::{ExerciseCommands, OutputFormat};
use crate::error::VisionError;
use crate::features::session::exercise;
use crate::output::{format_exercise, format_exercises};

/// Execute exercise subcommands.
///
/// # Errors
///
/// Returns `VisionError::NotFound` for an unknown exercise ID.
pub fn exercise(cmd: Option<ExerciseCommands>, format: OutputFormat) -> Result<String, VisionError> {
    match cmd.unwrap_or(ExerciseCommands::List) {
        ExerciseCommands::List => format_exercises(&exercise::catalog(), format),
        ExerciseCommands::Show { id } => {
            let found = exercise::find(&id).ok_or_else(|| {
                VisionError::NotFound(format!(
                    "No exercise '{id}'. Run 'visioncare exercise list' to see them all."
                ))
            })?;
            format_exercise(&found, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_show_unknown() {
        let err = exercise(
            Some(ExerciseCommands::Show {
                id: "squint".to_string(),
            }),
            OutputFormat::Pretty,
        )
        .unwrap_err();

        assert!(matches!(err, VisionError::NotFound(_)));
    }

    #[test]
    fn test_exercise_list_json() {
        let output = exercise(None, OutputFormat::Json).unwrap();
        assert!(output.contains("\"palming\""));
    }
}
