//! Configuration loader facade: one entry point over defaults and sources.

use crate::config::merge::merge_policy;
use crate::config::sources::{env_file, environment};
use crate::config::{RawSettings, Settings, DEFAULT_ENV_FILE};
use crate::error::GeneratorError;
use config::Map;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Layered settings resolver.
///
/// Precedence (highest first): process environment, env file, built-in default.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    env_file: Option<PathBuf>,
    environment: Option<Map<String, String>>,
}

impl ConfigLoader {
    /// Loader with no env file that reads the process environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader reading `<project_root>/.env` and the process environment.
    pub fn for_project(project_root: &Path) -> Self {
        Self::new().with_env_file(project_root.join(DEFAULT_ENV_FILE))
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Use the given variables instead of the process environment.
    pub fn with_environment<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Resolve and validate settings.
    pub fn load(&self) -> Result<Settings, GeneratorError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = env_file::add_to_builder(builder, self.env_file.as_deref())?;
        let vars = match &self.environment {
            Some(vars) => vars.clone(),
            None => environment::process_vars()?,
        };
        let builder = environment::add_to_builder(builder, vars);

        let raw: RawSettings = builder.build()?.try_deserialize()?;
        debug!(openapi_spec_url = %raw.openapi_spec_url, "Settings merged");

        Settings::try_from(raw)
    }
}
