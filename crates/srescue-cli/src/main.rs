//! spreadsheet-rescue CLI.

use clap::{ColorChoice, Parser};
use srescue_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use srescue_cli::commands::{run, validate};
use srescue_cli::logging::{init_logging, LogConfig, LogFormat};
use srescue_cli::summary::{print_run_summary, print_validation_summary};
use srescue_model::EXIT_UNEXPECTED;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_UNEXPECTED);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run(&args) {
            Ok(outcome) => {
                print_run_summary(&outcome);
                outcome.exit_code
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_UNEXPECTED
            }
        },
        Command::Validate(args) => match validate(&args) {
            Ok(outcome) => {
                print_validation_summary(&outcome);
                outcome.exit_code
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                EXIT_UNEXPECTED
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
