//! Subprocess execution seam.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

/// A program plus its arguments, not yet run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Prefix the invocation with `sudo`.
    pub fn elevated(self) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a finished subprocess exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("a signal"),
        }
    }
}

/// Runs invocations to completion, inheriting stdio.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<RunStatus>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<RunStatus> {
        debug!(command = %invocation, "running");
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()?;
        Ok(RunStatus {
            code: status.code(),
        })
    }
}

/// Full path of the executable `name` would run, if it is on `PATH`.
pub fn locate(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Whether `name` resolves to an executable on `PATH`.
pub fn command_exists(name: &str) -> bool {
    locate(name).is_some()
}
