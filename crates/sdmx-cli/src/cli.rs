//! CLI argument definitions for the SDG global filter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sdmx-filter",
    version,
    about = "SDG SDMX global filter - keep only globally compatible series",
    long_about = "Check national SDG SDMX submissions against the global DSD codelists \
                  and the per-series global content constraints.\n\n\
                  Compatible series are written to a filtered message; the rest are \
                  reported with deduplicated, sorted messages."
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
    /// Filter a data message down to its globally compatible series.
    Filter(FilterArgs),

    /// Apply the content constraints to a flat indicator CSV.
    Rows(RowsArgs),

    /// List the components of the global DSD.
    Structure(StandardsArgs),
}

/// Where the global DSD and content constraints are read from.
#[derive(Args, Clone, Default)]
pub struct StandardsArgs {
    /// Directory holding global_dsd.json and content_constraints.csv
    /// (default: $SDMX_STANDARDS_DIR, else the bundled standards).
    #[arg(long = "standards-dir", value_name = "DIR")]
    pub standards_dir: Option<PathBuf>,

    /// Global DSD file (overrides --standards-dir).
    #[arg(long = "structure", value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Content constraint table (overrides --standards-dir).
    #[arg(long = "constraints", value_name = "PATH")]
    pub constraints: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// Data message to filter (JSON hand-off form).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    #[command(flatten)]
    pub standards: StandardsArgs,

    /// Filtered message path (default: <DATA stem>.global.json next to DATA).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the filter report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Report only; do not write the filtered message.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct RowsArgs {
    /// Indicator CSV with one observation per row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Indicator id used in the summary line (default: the CSV file stem).
    #[arg(long = "indicator", value_name = "ID")]
    pub indicator: Option<String>,

    #[command(flatten)]
    pub standards: StandardsArgs,

    /// Constrained CSV path (default: <CSV stem>.global.csv next to CSV).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
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
