//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scholar CLI - AI-powered research paper analysis.
#[derive(Debug, Parser)]
#[command(name = "scholar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (confidence only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a research paper
    Analyze(AnalyzeArgs),

    /// Show or reset the papers-analyzed counter
    Stats(StatsArgs),

    /// Print a citation for a generated analysis
    Citation,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Plain-text paper file (.txt, .md)
    pub file: Option<PathBuf>,

    /// Read the paper from stdin
    #[arg(long, conflicts_with_all = ["file", "text"])]
    pub stdin: bool,

    /// Paper text given inline
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Paper title
    #[arg(long)]
    pub title: Option<String>,

    /// Page the paper came from; used to classify the source
    #[arg(short, long)]
    pub url: Option<String>,

    /// Write the analysis as a JSON export
    #[arg(short, long)]
    pub export: bool,

    /// Export file path (implies --export)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print share text after the analysis
    #[arg(long)]
    pub share: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model override
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the stats command.
#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Reset the counter to zero
    #[arg(long)]
    pub reset: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
