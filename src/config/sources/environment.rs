//! Environment source: `ARTIFACTS_MMO_*` variables.
//!
//! `ARTIFACTS_MMO_OPENAPI_SPEC_URL` maps to the `openapi_spec_url` key. Prefix
//! matching is case-insensitive and variables outside the prefix are ignored.
//! The process environment is snapshotted through `vars_os`, so unrelated
//! variables that are not valid UTF-8 never reach `config`.

use crate::config::ENV_PREFIX;
use crate::error::GeneratorError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};
use std::ffi::OsString;

/// Prefixed environment source over exactly the given variables.
pub fn prefixed(vars: Map<String, String>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .source(Some(vars))
}

/// Add the environment source to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Map<String, String>,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(prefixed(vars))
}

/// Snapshot the prefixed variables of the process environment.
pub fn process_vars() -> Result<Map<String, String>, GeneratorError> {
    collect_prefixed(std::env::vars_os())
}

/// Keep variables whose name carries the prefix. Non-UTF-8 names cannot carry
/// it and are skipped; a non-UTF-8 value under the prefix is a configuration error.
pub fn collect_prefixed(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> Result<Map<String, String>, GeneratorError> {
    let prefix = format!("{}_", ENV_PREFIX).to_lowercase();
    let mut collected = Map::new();

    for (key, value) in vars {
        let Some(key) = key.to_str() else {
            continue;
        };
        if !key.to_lowercase().starts_with(&prefix) {
            continue;
        }
        let value = value.into_string().map_err(|raw| {
            GeneratorError::Configuration(format!(
                "Environment variable {} is not valid UTF-8: {:?}",
                key, raw
            ))
        })?;
        collected.insert(key.to_string(), value);
    }

    Ok(collected)
}
