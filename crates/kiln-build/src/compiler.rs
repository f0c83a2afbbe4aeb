//! The compiler seam.

use std::path::PathBuf;
use std::process::Command;

use kiln_targets::TargetPlatform;
use tracing::debug;

use crate::error::CompileError;

/// Compiles the project for one target.
pub trait Compiler {
    /// Build for `target` and return where the executable is expected.
    ///
    /// The returned path is not checked; the orchestrator verifies it exists.
    fn compile(&self, target: &TargetPlatform) -> Result<PathBuf, CompileError>;
}

/// Compiles with `cargo build --release --target <triple>`.
#[derive(Debug, Clone)]
pub struct CargoCompiler {
    project_dir: PathBuf,
    binary: String,
    target_dir: PathBuf,
}

impl CargoCompiler {
    /// Compiler for the `binary` target of the cargo project at `project_dir`.
    ///
    /// Output goes to `<project_dir>/target`.
    pub fn new(project_dir: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        let project_dir = project_dir.into();
        let target_dir = project_dir.join("target");
        Self {
            project_dir,
            binary: binary.into(),
            target_dir,
        }
    }

    /// `<target-dir>/<triple>/release/<binary><ext>`
    pub fn output_path(&self, target: &TargetPlatform) -> PathBuf {
        self.target_dir
            .join(&target.triple)
            .join("release")
            .join(target.compiler_output_name(&self.binary))
    }

    fn command(&self, target: &TargetPlatform) -> Command {
        let mut cmd = Command::new("cargo");
        cmd.current_dir(&self.project_dir)
            .args(["build", "--release", "--bin", self.binary.as_str()])
            .arg("--target")
            .arg(&target.triple)
            .arg("--target-dir")
            .arg(&self.target_dir);
        cmd
    }
}

impl Compiler for CargoCompiler {
    fn compile(&self, target: &TargetPlatform) -> Result<PathBuf, CompileError> {
        let mut cmd = self.command(target);
        debug!(?cmd, "invoking compiler");
        let status = cmd.status().map_err(|source| CompileError::Spawn {
            program: "cargo".to_string(),
            source,
        })?;
        if !status.success() {
            let status = match status.code() {
                Some(code) => format!("exit code {code}"),
                None => "a signal".to_string(),
            };
            return Err(CompileError::Failed { status });
        }
        Ok(self.output_path(target))
    }
}
