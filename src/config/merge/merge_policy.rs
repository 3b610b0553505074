//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win. Order (lowest to highest): built-in defaults, env file,
//! process environment.

use crate::config::DEFAULT_OPENAPI_SPEC_URL;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("openapi_spec_url", DEFAULT_OPENAPI_SPEC_URL)
}
