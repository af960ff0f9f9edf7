//! CLI argument definitions for claims-recon.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "claims-recon",
    version,
    about = "Reconcile a rebuilt claims pipeline against its reference datasets",
    long_about = "Reconcile two independently produced tabular datasets that should hold\n\
                  the same records: a legacy reference (zip archives) and a rebuilt\n\
                  pipeline's output (flat CSV files). Reports record-existence\n\
                  discrepancies and per-column value mismatches."
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

    /// TOML file overriding the built-in dataset patterns and directories.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve inputs, compare every configured dataset pair, write reports.
    Run(RunArgs),

    /// Resolve inputs and preview archive contents without comparing.
    Inspect(DirArgs),

    /// List the configured logical datasets and their filename patterns.
    Datasets,
}

#[derive(Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Output directory for report files (default from configuration).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Compare with the chunked column reconciler.
    ///
    /// Accumulates mismatch counts over fixed-size key chunks instead of a
    /// single pass. Produces identical reports; intended for datasets too
    /// large to compare comfortably in one pass.
    #[arg(long = "chunked")]
    pub chunked: bool,

    /// Key chunk size used with --chunked.
    #[arg(long = "chunk-size", value_name = "N", default_value_t = 50_000)]
    pub chunk_size: usize,
}

#[derive(Parser)]
pub struct DirArgs {
    /// Directory holding the old-side archives (default from configuration).
    #[arg(long = "old-dir", value_name = "DIR")]
    pub old_dir: Option<PathBuf>,

    /// Directory holding the new-side CSV files (default from configuration).
    #[arg(long = "new-dir", value_name = "DIR")]
    pub new_dir: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
