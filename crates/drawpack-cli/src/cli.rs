//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use drawpack_cli::config::FlagOverrides;
use drawpack_model::Mode;

#[derive(Parser)]
#[command(
    name = "drawpack",
    version,
    about = "Drawing package builder - reorganize PN/DRW drawing exports into RFQ and PO packages",
    long_about = "Reorganize an uploaded drawing export into a package.\n\n\
                  Files under <PN...>/<DRW...> folder pairs are copied under a new root;\n\
                  RFQ packages keep PDFs only, PO packages also keep CAD formats."
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
    /// Show the destination tree for an upload.
    Preview(PackageArgs),

    /// Export the classification manifest as JSON.
    Manifest(ManifestArgs),

    /// Build the package bundle zip.
    Build(BuildArgs),

    /// Print a mailto: link for a request package.
    Mail(MailArgs),
}

/// Options shared by every subcommand.
#[derive(Args)]
pub struct PackageArgs {
    /// Uploaded zip archive.
    #[arg(value_name = "ZIP")]
    pub archive: PathBuf,

    /// Packaging mode (default: rfq, or the config file's mode).
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Root folder name (default: "<RFQ|PO><id> Drawing package").
    #[arg(long = "root", value_name = "NAME")]
    pub root: Option<String>,

    /// Folder names to drop before PN/DRW detection (repeatable, comma-separated).
    #[arg(long = "strip", value_name = "SEGMENT", value_delimiter = ',')]
    pub strip: Vec<String>,

    /// Place files outside PN/DRW folders under "attachments" instead of dropping them.
    #[arg(long = "include-unclassified")]
    pub include_unclassified: bool,

    /// TOML file with defaults for strip segments, fallback and mail template.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PackageArgs {
    pub fn overrides(&self, mail_template: Option<PathBuf>) -> FlagOverrides {
        FlagOverrides {
            mode: self.mode.map(Mode::from),
            root: self.root.clone(),
            strip_segments: self.strip.clone(),
            include_unclassified: self.include_unclassified,
            mail_template,
        }
    }
}

#[derive(Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Write JSON to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Directory for the bundle (default: next to the upload).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Plan the bundle and print the summary without writing it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct MailArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Mail body template (plain text).
    #[arg(long = "template", value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Also write an unsent .eml with the bundle files attached (file or directory).
    #[arg(long = "eml", value_name = "FILE")]
    pub eml: Option<PathBuf>,
}

/// CLI packaging modes.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Rfq,
    Po,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Rfq => Mode::Rfq,
            ModeArg::Po => Mode::Po,
        }
    }
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
