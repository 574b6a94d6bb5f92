use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::session::MAX_TICK_SECONDS;

#[derive(Parser)]
#[command(name = "visioncare")]
#[command(about = "Screen time tracking, eye breaks and eye exercises in your terminal")]
#[command(long_about = "visioncare - Eye care for screen workers

Tracks screen time while you work, schedules eye breaks, guides short
eye exercises, and keeps a small log of eye strain symptoms.

QUICK START:
  visioncare run              Open the live dashboard and start tracking
  visioncare status           Show today's screen time and break policy
  visioncare policy set --interval 30 --duration 3
  visioncare log add --severity 2 --symptom dryness

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  visioncare <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding config.yaml and the state database
    #[arg(long, global = true, env = "VISIONCARE_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's screen time, state and break policy
    ///
    /// Reads the saved session state. Today's counter is reported as zero
    /// if the last recorded day is in the past.
    ///
    /// # Examples
    ///
    ///   visioncare status
    ///   visioncare status -o json
    #[command(alias = "s")]
    Status,

    /// Open the live dashboard and track screen time
    ///
    /// Tracking starts immediately. Breaks are scheduled by the break
    /// policy; exercises can be started from the dashboard.
    ///
    /// Keys:
    ///   space  start/stop tracking     b  start break    e  end break
    ///   x      start exercise          n  next exercise  s  stop exercise
    ///   r      reset today             q  quit
    Run {
        /// Seconds between screen time ticks (overrides session.tick_seconds)
        #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..=MAX_TICK_SECONDS))]
        tick_seconds: Option<u64>,
    },

    /// Reset today's screen time
    ///
    /// The weekly history and the health log are kept.
    Reset,

    /// Show or change the break policy
    Policy(PolicyArgs),

    /// Browse the eye exercise catalog
    #[command(alias = "ex")]
    Exercise(ExerciseArgs),

    /// Record or list eye strain symptoms
    Log(LogArgs),

    /// Manage the next eye checkup date
    Checkup(CheckupArgs),

    /// Screen time over the last seven days
    #[command(alias = "w")]
    Week,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   visioncare completions zsh > ~/.zsh/completions/_visioncare
    ///   source <(visioncare completions bash)
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the break policy.
#[derive(Args)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: Option<PolicyCommands>,
}

/// Break policy subcommands.
#[derive(Subcommand)]
pub enum PolicyCommands {
    /// Show the current break policy (default)
    Show,

    /// Change the break policy
    ///
    /// Only the given fields change.
    ///
    /// Examples:
    ///   visioncare policy set --interval 30
    ///   visioncare policy set --duration 2 --enable
    ///   visioncare policy set --disable
    Set {
        /// Minutes of screen time between breaks (1-120)
        #[arg(long, short = 'i')]
        interval: Option<u32>,

        /// Break length in minutes (1-30)
        #[arg(long, short = 'd')]
        duration: Option<u32>,

        /// Turn automatic breaks on
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Turn automatic breaks off
        #[arg(long)]
        disable: bool,
    },
}

/// Arguments for the exercise catalog.
#[derive(Args)]
pub struct ExerciseArgs {
    #[command(subcommand)]
    pub command: Option<ExerciseCommands>,
}

/// Exercise subcommands.
#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// List all exercises (default)
    List,

    /// Show one exercise with its steps
    Show {
        /// Exercise ID (see `visioncare exercise list`)
        id: String,
    },
}

/// Arguments for the health log.
#[derive(Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub command: Option<LogCommands>,
}

/// Health log subcommands.
#[derive(Subcommand)]
pub enum LogCommands {
    /// Record symptoms
    ///
    /// The entry is stamped with today's screen time. Only the newest 30
    /// entries are kept.
    ///
    /// Examples:
    ///   visioncare log add --severity 3 --symptom dryness --symptom headache
    ///   visioncare log add -s 1 --notes "fine after a break"
    Add {
        /// Severity from 1 (mild) to 5 (severe)
        #[arg(long, short = 's', value_parser = clap::value_parser!(u8).range(1..=5))]
        severity: u8,

        /// Symptom name (repeatable)
        #[arg(long = "symptom", short = 'y', value_name = "SYMPTOM")]
        symptoms: Vec<String>,

        /// Free-form notes
        #[arg(long, short = 'n')]
        notes: Option<String>,
    },

    /// List entries, newest first (default)
    List {
        /// Show at most this many entries
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },
}

/// Arguments for the checkup date.
#[derive(Args)]
pub struct CheckupArgs {
    #[command(subcommand)]
    pub command: Option<CheckupCommands>,
}

/// Checkup subcommands.
#[derive(Subcommand)]
pub enum CheckupCommands {
    /// Show the next checkup date (default)
    Show,

    /// Set the next checkup date
    Set {
        /// Date as YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Clear the next checkup date
    Clear,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_status() {
        let cli = Cli::try_parse_from(["visioncare", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_global_output() {
        let cli = Cli::try_parse_from(["visioncare", "week", "-o", "json"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_cli_run_tick_seconds() {
        let cli = Cli::try_parse_from(["visioncare", "run", "--tick-seconds", "5"]).unwrap();
        if let Commands::Run { tick_seconds } = cli.command {
            assert_eq!(tick_seconds, Some(5));
        } else {
            panic!("Expected Run command");
        }

        assert!(Cli::try_parse_from(["visioncare", "run", "--tick-seconds", "0"]).is_err());
        assert!(
            Cli::try_parse_from(["visioncare", "run", "--tick-seconds", "10000000000000000"])
                .is_err()
        );
    }

    #[test]
    fn test_cli_policy_default() {
        let cli = Cli::try_parse_from(["visioncare", "policy"]).unwrap();
        if let Commands::Policy(args) = cli.command {
            assert!(args.command.is_none());
        } else {
            panic!("Expected Policy command");
        }
    }

    #[test]
    fn test_cli_policy_set() {
        let cli =
            Cli::try_parse_from(["visioncare", "policy", "set", "--interval", "30", "--disable"])
                .unwrap();
        if let Commands::Policy(args) = cli.command {
            if let Some(PolicyCommands::Set {
                interval,
                duration,
                enable,
                disable,
            }) = args.command
            {
                assert_eq!(interval, Some(30));
                assert!(duration.is_none());
                assert!(!enable);
                assert!(disable);
            } else {
                panic!("Expected Set subcommand");
            }
        } else {
            panic!("Expected Policy command");
        }
    }

    #[test]
    fn test_cli_policy_enable_conflicts_with_disable() {
        let result =
            Cli::try_parse_from(["visioncare", "policy", "set", "--enable", "--disable"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_log_add() {
        let cli = Cli::try_parse_from([
            "visioncare",
            "log",
            "add",
            "-s",
            "3",
            "--symptom",
            "dryness",
            "--symptom",
            "blur",
        ])
        .unwrap();
        if let Commands::Log(args) = cli.command {
            if let Some(LogCommands::Add {
                severity, symptoms, ..
            }) = args.command
            {
                assert_eq!(severity, 3);
                assert_eq!(symptoms, vec!["dryness", "blur"]);
            } else {
                panic!("Expected Add subcommand");
            }
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn test_cli_log_add_rejects_bad_severity() {
        assert!(Cli::try_parse_from(["visioncare", "log", "add", "-s", "6"]).is_err());
        assert!(Cli::try_parse_from(["visioncare", "log", "add", "-s", "0"]).is_err());
    }

    #[test]
    fn test_cli_checkup_set() {
        let cli = Cli::try_parse_from(["visioncare", "checkup", "set", "2026-11-02"]).unwrap();
        if let Commands::Checkup(args) = cli.command {
            if let Some(CheckupCommands::Set { date }) = args.command {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
            } else {
                panic!("Expected Set subcommand");
            }
        } else {
            panic!("Expected Checkup command");
        }

        assert!(Cli::try_parse_from(["visioncare", "checkup", "set", "next week"]).is_err());
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["visioncare", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }
}
