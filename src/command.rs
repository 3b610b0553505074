//! External command execution.
//!
//! Every subprocess goes through [`CommandRunner`] so the workflow can be driven
//! against a scripted runner in tests. [`SystemRunner`] spawns the real process,
//! inherits stdio, and blocks until it exits.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// A program plus its fixed argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a finished command exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit detail for failure records.
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("returned non-zero exit status {}.", code),
            None => "was terminated by a signal.".to_string(),
        }
    }
}

/// Runs an invocation to completion.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus> {
        (**self).run(invocation)
    }
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus> {
        debug!(command = %invocation, "Spawning command");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()?;
        debug!(command = %invocation, code = ?status.code(), "Command exited");
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
