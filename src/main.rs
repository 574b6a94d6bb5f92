use clap::Parser;
use colored::Colorize;

use visioncare::cli::args::{Cli, Commands, ExerciseArgs};
use visioncare::cli::commands::{self, Context};
use visioncare::config::{ColorSetting, Config, Paths};
use visioncare::error::VisionError;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), VisionError> {
    let cli = Cli::parse();
    let paths = Paths::resolve(cli.data_dir)?;
    let config = Config::load_from_path(&paths.config_file)?;

    init_logging(&config);
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let ctx = Context::new(paths, config, format);
    log::debug!("Using data directory {}", ctx.paths.root.display());

    let output = match cli.command {
        Commands::Status => commands::status(&ctx)?,
        Commands::Run { tick_seconds } => commands::run(&ctx, tick_seconds)?,
        Commands::Reset => commands::reset(&ctx)?,
        Commands::Policy(args) => commands::policy(&ctx, args.command)?,
        Commands::Exercise(ExerciseArgs { command }) => commands::exercise(command, format)?,
        Commands::Log(args) => commands::health_log(&ctx, args.command)?,
        Commands::Checkup(args) => commands::checkup(&ctx, args.command)?,
        Commands::Week => commands::week(&ctx)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to stderr at `general.log_level`; `RUST_LOG` overrides it.
fn init_logging(config: &Config) {
    let level = config
        .general
        .log_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Warn);

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
