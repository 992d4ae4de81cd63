//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "embla",
    version,
    about = "Inspect Embla/RemLogic sleep recordings",
    long_about = "Inspect Embla/RemLogic sleep recordings.\n\n\
                  Detects recording directories and decodes exported recording documents."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

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
    /// Check whether a directory holds an Embla recording and list its files.
    Detect(DetectArgs),

    /// Decode an exported recording document and print its fields.
    Metadata(MetadataArgs),
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Recording directory.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,
}

#[derive(Parser)]
pub struct MetadataArgs {
    /// Recording document, UTF-16 with byte order mark or UTF-8.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Manufacturer reported for the recording device.
    #[arg(long = "manufacturer", default_value = "RemLogic")]
    pub manufacturer: String,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
