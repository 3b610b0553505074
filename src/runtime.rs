//! Runtime Locator
//!
//! Finds the script runtime (`deno`) used to launch the npm-distributed
//! OpenAPI generator. Lookup only; nothing is installed or modified.

use crate::error::GeneratorError;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

/// Executable name of the script runtime.
pub const RUNTIME_BINARY: &str = "deno";

/// Locates the runtime on a search path.
#[derive(Debug, Clone)]
pub struct RuntimeLocator {
    binary: String,
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl RuntimeLocator {
    /// Locator for `deno` on the process `PATH`.
    pub fn new() -> Self {
        Self {
            binary: RUNTIME_BINARY.to_string(),
            search_path: std::env::var_os("PATH"),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Search the given `PATH`-style list instead of the process `PATH`.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Resolve the runtime executable to an absolute path.
    pub fn locate(&self) -> Result<PathBuf, GeneratorError> {
        let Some(search_path) = self.search_path.as_ref() else {
            return Err(GeneratorError::RuntimeNotFound {
                binary: self.binary.clone(),
                reason: "PATH is not set".to_string(),
            });
        };

        let path = which::which_in(&self.binary, Some(search_path), &self.cwd).map_err(|e| {
            GeneratorError::RuntimeNotFound {
                binary: self.binary.clone(),
                reason: e.to_string(),
            }
        })?;

        debug!(runtime = %path.display(), "Runtime located");
        Ok(path)
    }
}

impl Default for RuntimeLocator {
    fn default() -> Self {
        Self::new()
    }
}
