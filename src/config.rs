//! Configuration System
//!
//! Resolves the generator settings once per run from layered sources: built-in
//! defaults, an optional env file, and `ARTIFACTS_MMO_`-prefixed environment
//! variables. The resolved [`Settings`] value is validated before any external
//! command runs and is immutable afterwards.

use crate::error::GeneratorError;
use serde::Deserialize;
use url::Url;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// OpenAPI document used when nothing overrides it.
pub const DEFAULT_OPENAPI_SPEC_URL: &str = "https://api.artifactsmmo.com/openapi.json";

/// Prefix shared by every environment variable the loader reads.
pub const ENV_PREFIX: &str = "ARTIFACTS_MMO";

/// Env file read from the project root unless another path is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Settings exactly as merged from the sources, before validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSettings {
    pub openapi_spec_url: String,
}

/// Validated generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    openapi_spec_url: Url,
}

impl Settings {
    /// Build settings from a spec URL, rejecting anything that is not an
    /// absolute http(s) URL with a host.
    pub fn new(openapi_spec_url: &str) -> Result<Self, GeneratorError> {
        let url = Url::parse(openapi_spec_url).map_err(|e| {
            GeneratorError::Configuration(format!(
                "Invalid openapi_spec_url '{}': {}",
                openapi_spec_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GeneratorError::Configuration(format!(
                "Invalid openapi_spec_url '{}': scheme must be http or https",
                openapi_spec_url
            )));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(GeneratorError::Configuration(format!(
                "Invalid openapi_spec_url '{}': missing host",
                openapi_spec_url
            )));
        }

        Ok(Self {
            openapi_spec_url: url,
        })
    }

    pub fn openapi_spec_url(&self) -> &Url {
        &self.openapi_spec_url
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openapi_spec_url: Url::parse(DEFAULT_OPENAPI_SPEC_URL)
                .expect("built-in spec URL is valid"),
        }
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = GeneratorError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        Settings::new(&raw.openapi_spec_url)
    }
}
