//! CLI parse: clap types for artifacts-codegen. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Generate the Artifacts MMO Python client from its OpenAPI spec and install it
#[derive(Debug, Parser)]
#[command(name = "artifacts-codegen")]
#[command(about = "Generate and install the Artifacts MMO Python API client")]
pub struct Cli {
    /// Project root; the client is generated into <root>/artifacts_api_client
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Env file to read instead of <root>/.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Disable logging
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
