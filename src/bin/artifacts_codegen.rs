//! Artifacts Codegen CLI Binary
//!
//! Generates the Artifacts MMO Python client and installs it into the active
//! environment. Exits 0 on success and 1 on any failure.

use artifacts_codegen::cli::{map_error, Cli};
use artifacts_codegen::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use artifacts_codegen::workflow::Orchestrator;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let project_root = absolute_project_root(&cli.project_root);
    let orchestrator = Orchestrator::for_project(&project_root, cli.env_file.clone());
    let outcome = orchestrator.run();

    if let Some(ref err) = outcome.error {
        if !logging_config.enabled {
            eprintln!("{}", map_error(err));
        }
    }

    process::exit(outcome.exit_code());
}

/// Build logging configuration from CLI args.
/// Precedence: CLI flags override defaults; env vars are applied in `init_logging`.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    if config.enabled && config.output == "file" {
        if let Ok(path) = resolve_log_file_path(cli.log_file.clone(), config.file.clone()) {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

fn absolute_project_root(root: &Path) -> PathBuf {
    if root.is_absolute() {
        return root.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(root))
        .unwrap_or_else(|_| root.to_path_buf())
}
