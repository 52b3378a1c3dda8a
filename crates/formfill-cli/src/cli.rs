//! CLI argument definitions for the formfill tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formfill",
    version,
    about = "Fill government tax form PDFs from answer records",
    long_about = "Fill interactive PDF form templates from a flat JSON answer record.\n\n\
                  Field mappings are declarative, per-form JSON tables; values are\n\
                  transformed, split, and one-hot expanded before being written to\n\
                  the template's interactive fields."
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

    /// Allow answer values (PII) to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill a form's template from a JSON answer record.
    Fill(FillArgs),

    /// Enumerate the interactive fields of a PDF template.
    Inspect(InspectArgs),

    /// Report fillability of every registered form's template.
    Check(CheckArgs),

    /// List registered form mappings.
    Forms(FormsArgs),
}

#[derive(Parser)]
pub struct FillArgs {
    /// Form identifier (e.g. wi_form_1).
    #[arg(value_name = "FORM_ID")]
    pub form_id: String,

    /// JSON file with the flat answer record.
    #[arg(long = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// Directory containing template PDFs.
    #[arg(long = "templates", value_name = "DIR", default_value = ".")]
    pub templates: PathBuf,

    /// Directory of mapping tables (defaults to the bundled samples).
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,

    /// Output path (default: <FORM_ID>.filled.pdf).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Convert interactive fields to static page content after filling.
    #[arg(long = "flatten")]
    pub flatten: bool,

    /// Resolve and print the target record without touching the template.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the PDF template to inspect.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Directory containing template PDFs.
    #[arg(long = "templates", value_name = "DIR", default_value = ".")]
    pub templates: PathBuf,

    /// Directory of mapping tables (defaults to the bundled samples).
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FormsArgs {
    /// Directory of mapping tables (defaults to the bundled samples).
    #[arg(long = "mappings", value_name = "DIR")]
    pub mappings: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
