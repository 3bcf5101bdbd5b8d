//! CLI argument definitions for the 837I submission pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "edi837",
    version,
    about = "Institutional claim 837I generator - validate and encode claim batches",
    long_about = "Validate institutional claims against a payer profile and encode the\n\
                  accepted claims into X12 837I documents, one file per batch.\n\
                  Validation findings are written to a plain-text log and a JSON payload."
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
    /// Validate a claim record-set and generate 837I documents.
    Submit(SubmitArgs),

    /// List the payer rule set applied during validation.
    Rules,
}

#[derive(Parser)]
pub struct SubmitArgs {
    /// Directory containing the claim record-set CSV files.
    #[arg(value_name = "RECORD_SET_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for documents and logs (default: <RECORD_SET_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Submission profile JSON overriding the built-in payer defaults.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum claims per document (overrides the profile's batch size).
    #[arg(long = "batch-size", value_name = "N")]
    pub batch_size: Option<usize>,

    /// Validate and write the log without emitting EDI documents.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Draw control numbers from a monotonic counter instead of randomly.
    ///
    /// Random draws carry a small collision risk across runs; the counter
    /// is collision-free within one process.
    #[arg(long = "sequential-control-numbers")]
    pub sequential_control_numbers: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
