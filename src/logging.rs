//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides configurable
//! log levels, output formats, and destinations. Workflow events are emitted as the
//! event message with their context as fields, so `json` output yields one
//! machine-readable record per stage boundary.

use crate::error::GeneratorError;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_ENV: &str = "ARTIFACTS_CODEGEN_LOG";
const LOG_FORMAT_ENV: &str = "ARTIFACTS_CODEGEN_LOG_FORMAT";
const LOG_OUTPUT_ENV: &str = "ARTIFACTS_CODEGEN_LOG_OUTPUT";
const LOG_MODULES_ENV: &str = "ARTIFACTS_CODEGEN_LOG_MODULES";
const LOG_FILE_NAME: &str = "artifacts-codegen.log";

/// Logging configuration
///
/// Built from CLI flags. Per-module levels come only from
/// `ARTIFACTS_CODEGEN_LOG_MODULES` (`module=level,...`).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Disable to skip subscriber setup entirely
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: json, text (default: text)
    pub format: String,

    /// Output destination: stdout, stderr, file
    pub output: String,

    /// Log file path (if output is "file"); resolved at startup when unset
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stdout".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Resolve the log file path.
///
/// Precedence: explicit path, then configured path, then
/// `<platform state dir>/artifacts-codegen.log`.
pub fn resolve_log_file_path(
    explicit: Option<PathBuf>,
    configured: Option<PathBuf>,
) -> Result<PathBuf, GeneratorError> {
    if let Some(path) = explicit.or(configured) {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("", "", "artifacts-codegen").ok_or_else(|| {
        GeneratorError::Logging("Cannot determine a home directory for the log file".to_string())
    })?;
    let base = dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| dirs.data_local_dir().to_path_buf());
    Ok(base.join(LOG_FILE_NAME))
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (ARTIFACTS_CODEGEN_LOG, ARTIFACTS_CODEGEN_LOG_FORMAT, ...)
/// 2. The given config (already merged with CLI flags)
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), GeneratorError> {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);

    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let writer = if output.file {
        let log_file = resolve_log_file_path(None, config.file.clone())?;
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Logging(format!("Failed to create log directory: {}", e))
            })?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| {
                GeneratorError::Logging(format!("Failed to open log file {:?}: {}", log_file, e))
            })?;
        BoxMakeWriter::new(Arc::new(file))
    } else if output.stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    let base_subscriber = Registry::default().with(filter);

    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color && !output.file)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| GeneratorError::Logging(e.to_string()))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, GeneratorError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(&config.level);

    if let Ok(modules_str) = std::env::var(LOG_MODULES_ENV) {
        for module_spec in modules_str.split(',') {
            let parts: Vec<&str> = module_spec.split('=').collect();
            if parts.len() == 2 {
                let directive = format!("{}={}", parts[0].trim(), parts[1].trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    GeneratorError::Logging(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<String, GeneratorError> {
    format_from(std::env::var(LOG_FORMAT_ENV).ok(), config)
}

/// A valid override wins; an invalid one falls back to the configured format.
fn format_from(
    override_format: Option<String>,
    config: &LoggingConfig,
) -> Result<String, GeneratorError> {
    if let Some(format) = override_format {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.format.as_str();
    if format != "json" && format != "text" {
        return Err(GeneratorError::Logging(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

/// Output destination
#[derive(Debug, PartialEq, Eq)]
struct OutputDestination {
    #[allow(dead_code)] // stdout is the fallback when neither flag below is set
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Determine output destination from config or environment
fn determine_output(config: &LoggingConfig) -> Result<OutputDestination, GeneratorError> {
    if let Ok(output) = std::env::var(LOG_OUTPUT_ENV) {
        return parse_output_destination(&output);
    }

    parse_output_destination(&config.output)
}

fn parse_output_destination(output: &str) -> Result<OutputDestination, GeneratorError> {
    match output {
        "stdout" => Ok(OutputDestination {
            stdout: true,
            stderr: false,
            file: false,
        }),
        "stderr" => Ok(OutputDestination {
            stdout: false,
            stderr: true,
            file: false,
        }),
        "file" => Ok(OutputDestination {
            stdout: false,
            stderr: false,
            file: true,
        }),
        _ => Err(GeneratorError::Logging(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
