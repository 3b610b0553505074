//! Client generation stage.
//!
//! Runs the npm-distributed OpenAPI generator through `deno x` with a fixed
//! argument set. The output layout belongs to the generator.

use crate::command::{CommandRunner, Invocation};
use crate::error::GeneratorError;
use std::path::Path;
use url::Url;

/// npm package providing the generator CLI.
pub const GENERATOR_PACKAGE: &str = "npm:@openapitools/openapi-generator-cli";

/// Generator target.
pub const TARGET_LANGUAGE: &str = "python";

/// Name of the generated Python package.
pub const PACKAGE_NAME: &str = "artifacts_api_client";

/// Build the generator command line.
pub fn invocation(runtime: &Path, spec_url: &Url, output_dir: &Path) -> Invocation {
    Invocation::new(runtime.to_string_lossy())
        .arg("x")
        .arg(GENERATOR_PACKAGE)
        .arg("generate")
        .arg("-i")
        .arg(spec_url.as_str())
        .arg("-g")
        .arg(TARGET_LANGUAGE)
        .arg("-o")
        .path_arg(output_dir)
        .arg(format!("--additional-properties=packageName={}", PACKAGE_NAME))
        .arg("--skip-validate-spec")
}

/// Run the generator once and wait for it.
pub fn run<R: CommandRunner>(
    runner: &R,
    runtime: &Path,
    spec_url: &Url,
    output_dir: &Path,
) -> Result<(), GeneratorError> {
    let invocation = invocation(runtime, spec_url, output_dir);
    let status = runner
        .run(&invocation)
        .map_err(|source| GeneratorError::Spawn {
            command: invocation.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(GeneratorError::GenerationFailed {
            command: invocation.to_string(),
            detail: status.describe(),
        });
    }
    Ok(())
}
