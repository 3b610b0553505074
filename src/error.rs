//! Error types for the client generation workflow.

use thiserror::Error;

/// Errors raised by any stage of the generate-and-install workflow.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Runtime not found: {binary} ({reason})")]
    RuntimeNotFound { binary: String, reason: String },

    #[error("Command '{command}' {detail}")]
    GenerationFailed { command: String, detail: String },

    #[error("Command '{command}' {detail}")]
    InstallFailed { command: String, detail: String },

    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl GeneratorError {
    /// Stable category name, reported as `error_type` in failure records.
    pub fn category(&self) -> &'static str {
        match self {
            GeneratorError::Configuration(_) => "ConfigurationError",
            GeneratorError::RuntimeNotFound { .. } => "RuntimeNotFoundError",
            GeneratorError::GenerationFailed { .. } | GeneratorError::InstallFailed { .. } => {
                "SubprocessFailureError"
            }
            GeneratorError::Spawn { .. } | GeneratorError::Logging(_) => "UnexpectedError",
        }
    }

    /// True when an external command ran but exited unsuccessfully.
    pub fn is_subprocess_failure(&self) -> bool {
        matches!(
            self,
            GeneratorError::GenerationFailed { .. } | GeneratorError::InstallFailed { .. }
        )
    }
}

impl From<config::ConfigError> for GeneratorError {
    fn from(err: config::ConfigError) -> Self {
        GeneratorError::Configuration(err.to_string())
    }
}
