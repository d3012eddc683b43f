//! CLI argument definitions for spreadsheet-rescue.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use srescue_model::{DateMode, NumberLocale};

#[derive(Parser)]
#[command(
    name = "srescue",
    version,
    about = "spreadsheet-rescue - Clean messy spreadsheets into client-ready reports",
    long_about = "Convert a messy CSV or Excel export into a cleaned dataset,\n\
                  a formatted Excel report, a QC report, and a run manifest.\n\n\
                  Exit codes: 0 = success, 2 = input/contract violation, 1 = unexpected failure."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the cleaning pipeline and write report, QC, and manifest.
    Run(CleanArgs),

    /// Check a file without writing the Excel report (QC + manifest only).
    Validate(CleanArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the CSV or Excel input file.
    #[arg(long = "input", short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for report, QC, and manifest.
    #[arg(
        long = "out-dir",
        short = 'o',
        value_name = "DIR",
        default_value = "output"
    )]
    pub out_dir: PathBuf,

    /// Column mapping: target=source (rename source -> target).
    /// E.g. --map revenue=Sales --map date=OrderDate
    #[arg(long = "map", short = 'm', value_name = "TARGET=SOURCE")]
    pub map: Vec<String>,

    /// Profile file containing column mappings (target=source lines).
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Read ambiguous dates like 01/02/2024 as day/month (DD/MM).
    #[arg(long = "dayfirst", conflicts_with = "monthfirst")]
    pub dayfirst: bool,

    /// Read ambiguous dates as month/day (MM/DD). This is the default.
    #[arg(long = "monthfirst")]
    pub monthfirst: bool,

    /// Numeric separator convention for revenue/cost/units.
    #[arg(long = "number-locale", value_enum, default_value = "auto")]
    pub number_locale: NumberLocaleArg,
}

impl CleanArgs {
    pub fn date_mode(&self) -> DateMode {
        if self.dayfirst {
            DateMode::DayFirst
        } else {
            DateMode::MonthFirst
        }
    }

    pub fn number_locale(&self) -> NumberLocale {
        match self.number_locale {
            NumberLocaleArg::Auto => NumberLocale::Auto,
            NumberLocaleArg::Us => NumberLocale::Us,
            NumberLocaleArg::Eu => NumberLocale::Eu,
        }
    }
}

/// CLI numeric locale choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum NumberLocaleArg {
    Auto,
    Us,
    Eu,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
