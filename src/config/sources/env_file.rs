//! Env file source: `KEY=value` lines read with dotenvy.
//!
//! The file only feeds the loader. It is never exported into the process
//! environment, so the process environment keeps precedence over it.

use crate::config::sources::environment;
use crate::error::GeneratorError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Map};
use std::path::Path;
use tracing::debug;

/// Read all variables from an env file. Returns `None` when the file does not exist.
pub fn read(path: &Path) -> Result<Option<Map<String, String>>, GeneratorError> {
    if !path.exists() {
        debug!(env_file = %path.display(), "Env file not found, skipping");
        return Ok(None);
    }

    let entries = dotenvy::from_path_iter(path).map_err(|e| {
        GeneratorError::Configuration(format!(
            "Failed to read env file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut vars = Map::new();
    for entry in entries {
        let (key, value) = entry.map_err(|e| {
            GeneratorError::Configuration(format!(
                "Failed to parse env file {}: {}",
                path.display(),
                e
            ))
        })?;
        vars.insert(key, value);
    }

    debug!(env_file = %path.display(), entries = vars.len(), "Env file loaded");
    Ok(Some(vars))
}

/// Add the env file's prefixed variables to builder, if the file exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, GeneratorError> {
    let Some(path) = path else {
        return Ok(builder);
    };

    match read(path)? {
        Some(vars) => Ok(environment::add_to_builder(builder, vars)),
        None => Ok(builder),
    }
}
