//! Package installation stage: editable install of the generated client via `uv`.

use crate::command::{CommandRunner, Invocation};
use crate::error::GeneratorError;
use std::path::Path;

/// Package manager executable, resolved from `PATH` at spawn time.
pub const INSTALLER_BINARY: &str = "uv";

/// Build `uv pip install -e <output_dir>`.
pub fn invocation(output_dir: &Path) -> Invocation {
    Invocation::new(INSTALLER_BINARY)
        .arg("pip")
        .arg("install")
        .arg("-e")
        .path_arg(output_dir)
}

/// Install the generated package once and wait for the installer.
pub fn run<R: CommandRunner>(runner: &R, output_dir: &Path) -> Result<(), GeneratorError> {
    let invocation = invocation(output_dir);
    let status = runner
        .run(&invocation)
        .map_err(|source| GeneratorError::Spawn {
            command: invocation.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(GeneratorError::InstallFailed {
            command: invocation.to_string(),
            detail: status.describe(),
        });
    }
    Ok(())
}
