//! Generate-and-install workflow
//!
//! Sequential pipeline of typed stages:
//! `Idle -> ConfigResolved -> RuntimeLocated -> Generated -> Installed -> Done`.
//! Any stage error moves the run to `Failed`, emits one failure record and maps
//! to exit code 1. Every external command is attempted at most once per run.

use crate::command::{CommandRunner, SystemRunner};
use crate::config::ConfigLoader;
use crate::error::GeneratorError;
use crate::runtime::RuntimeLocator;
use crate::{generate, install};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Directory, relative to the project root, the client is generated into.
pub const OUTPUT_DIR: &str = "artifacts_api_client";

/// Workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigResolved,
    RuntimeLocated,
    Generated,
    Installed,
    Done,
    Failed,
}

/// Structured log events emitted at stage boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    ConfigLoaded,
    GeneratingClient,
    GenerationComplete,
    InstallingClient,
    WorkflowComplete,
    GenerationFailed,
    ExecutionFailed,
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::ConfigLoaded => "config_loaded",
            WorkflowEvent::GeneratingClient => "generating_client",
            WorkflowEvent::GenerationComplete => "generation_complete",
            WorkflowEvent::InstallingClient => "installing_client",
            WorkflowEvent::WorkflowComplete => "workflow_complete",
            WorkflowEvent::GenerationFailed => "generation_failed",
            WorkflowEvent::ExecutionFailed => "execution_failed",
        }
    }
}

impl fmt::Display for WorkflowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one workflow run.
#[derive(Debug)]
pub struct WorkflowOutcome {
    /// Terminal stage: `Done` or `Failed`.
    pub stage: Stage,
    /// Last stage completed before the terminal one.
    pub completed: Stage,
    /// Events in emission order.
    pub events: Vec<WorkflowEvent>,
    pub error: Option<GeneratorError>,
}

impl WorkflowOutcome {
    pub fn succeeded(&self) -> bool {
        self.stage == Stage::Done
    }

    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(WorkflowEvent::name).collect()
    }
}

/// Stage and event bookkeeping for a single run.
struct RunState {
    stage: Stage,
    events: Vec<WorkflowEvent>,
}

impl RunState {
    fn new() -> Self {
        Self {
            stage: Stage::Idle,
            events: Vec::new(),
        }
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = ?self.stage, to = ?next, "Workflow stage transition");
        self.stage = next;
    }

    fn record(&mut self, event: WorkflowEvent) -> WorkflowEvent {
        self.events.push(event);
        event
    }
}

/// Drives configuration, runtime lookup, generation and installation.
pub struct Orchestrator<R> {
    loader: ConfigLoader,
    locator: RuntimeLocator,
    output_dir: PathBuf,
    runner: R,
}

impl Orchestrator<SystemRunner> {
    /// Production orchestrator for a project root, spawning real processes.
    pub fn for_project(project_root: &Path, env_file: Option<PathBuf>) -> Self {
        let loader = match env_file {
            Some(path) => ConfigLoader::new().with_env_file(path),
            None => ConfigLoader::for_project(project_root),
        };
        Self::new(
            loader,
            RuntimeLocator::new(),
            project_root.join(OUTPUT_DIR),
            SystemRunner,
        )
    }
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(
        loader: ConfigLoader,
        locator: RuntimeLocator,
        output_dir: PathBuf,
        runner: R,
    ) -> Self {
        Self {
            loader,
            locator,
            output_dir,
            runner,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run the whole workflow once. Never panics on stage failure; the error
    /// is logged and carried in the outcome.
    pub fn run(&self) -> WorkflowOutcome {
        let mut state = RunState::new();
        match self.execute(&mut state) {
            Ok(()) => {
                let completed = state.stage;
                state.advance(Stage::Done);
                WorkflowOutcome {
                    stage: Stage::Done,
                    completed,
                    events: state.events,
                    error: None,
                }
            }
            Err(err) => self.fail(state, err),
        }
    }

    fn execute(&self, state: &mut RunState) -> Result<(), GeneratorError> {
        let settings = self.loader.load()?;
        state.advance(Stage::ConfigResolved);

        let runtime = self.locator.locate()?;
        state.advance(Stage::RuntimeLocated);

        let output = self.output_dir.display();
        let event = state.record(WorkflowEvent::ConfigLoaded);
        info!(url = %settings.openapi_spec_url(), output = %output, "{}", event);

        let event = state.record(WorkflowEvent::GeneratingClient);
        info!(
            detail = "Running OpenAPI Generator through deno x",
            runtime = %runtime.display(),
            "{}",
            event
        );
        generate::run(
            &self.runner,
            &runtime,
            settings.openapi_spec_url(),
            &self.output_dir,
        )?;
        state.advance(Stage::Generated);

        let event = state.record(WorkflowEvent::GenerationComplete);
        info!(status = "success", path = %output, "{}", event);

        let event = state.record(WorkflowEvent::InstallingClient);
        info!(
            detail = "Installing into the active environment via uv",
            "{}",
            event
        );
        install::run(&self.runner, &self.output_dir)?;
        state.advance(Stage::Installed);

        let event = state.record(WorkflowEvent::WorkflowComplete);
        info!(detail = "Client generated and installed", "{}", event);
        Ok(())
    }

    fn fail(&self, mut state: RunState, err: GeneratorError) -> WorkflowOutcome {
        let completed = state.stage;

        if err.is_subprocess_failure() {
            let event = state.record(WorkflowEvent::GenerationFailed);
            error!(
                error = %err,
                stage = ?completed,
                path = %self.output_dir.display(),
                "{}",
                event
            );
        } else {
            let event = state.record(WorkflowEvent::ExecutionFailed);
            error!(error = %err, error_type = err.category(), "{}", event);
        }

        // Generated output is kept on disk; the run still fails.
        if completed == Stage::Generated {
            warn!(path = %self.output_dir.display(), "Generated client left in place");
        }

        state.advance(Stage::Failed);
        WorkflowOutcome {
            stage: Stage::Failed,
            completed,
            events: state.events,
            error: Some(err),
        }
    }
}
