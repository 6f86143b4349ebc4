use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Rewrite a Notion export into an Obsidian-ready vault
#[derive(Parser, Debug)]
#[command(name = "obsidianize", version, about)]
pub struct Cli {
    /// Root of the Notion export to fix (prompted for when omitted)
    pub path: Option<PathBuf>,

    /// Output format for the summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable verbose (debug) logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "OBSIDIANIZE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Suppress the summary and error output
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text summary
    Human,
    /// Single-line JSON summary
    Json,
}
