//! CLI output: error mapping from workflow errors to a stable CLI surface.

use crate::error::GeneratorError;

/// Map a workflow error to a single line for stderr, prefixed with its category.
pub fn map_error(e: &GeneratorError) -> String {
    format!("{}: {}", e.category(), e)
}
