use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Command-line arguments for the tipmark binary.
#[derive(Debug, Parser, Default)]
#[command(
    name = "tipmark",
    version,
    about = "Render markdown as sanitized HTML or plain text"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "TIPMARK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Output mode: `html` or `text`.
    #[arg(long, short = 'm', value_name = "MODE")]
    pub mode: Option<String>,

    /// Override the log level (trace, debug, info, warn, error, off).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON.
    #[arg(long = "log-json", action = clap::ArgAction::SetTrue)]
    pub log_json: bool,

    /// Markdown file to render; reads stdin when omitted or `-`.
    #[arg(value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,
}
