//! Build session errors.

use std::path::PathBuf;

/// Why a single compiler invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The compiler could not be started.
    #[error("failed to launch `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The compiler ran and reported failure.
    #[error("compiler exited with {status}")]
    Failed { status: String },
}

/// Errors that end a build session.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The output directory could not be created or read.
    #[error("output directory {} is unusable", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact left by an earlier session could not be removed.
    #[error("failed to remove previous artifact {}", path.display())]
    PreviousArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The compiler failed for this target; later targets were not attempted.
    #[error("compilation failed for target {target}")]
    CompilationFailed {
        target: String,
        #[source]
        source: CompileError,
    },

    /// The compiler reported success but its output file is not there.
    #[error("compiler succeeded for target {target} but produced no file at {}", path.display())]
    ArtifactMissing { target: String, path: PathBuf },

    /// Copying the executable into the output directory failed.
    #[error("failed to copy the {target} artifact to {}", path.display())]
    ArtifactCopyFailed {
        target: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Target the failure is attributed to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            BuildError::OutputDir { .. } | BuildError::PreviousArtifact { .. } => None,
            BuildError::CompilationFailed { target, .. }
            | BuildError::ArtifactMissing { target, .. }
            | BuildError::ArtifactCopyFailed { target, .. } => Some(target),
        }
    }
}

/// Result type for build sessions.
pub type Result<T> = std::result::Result<T, BuildError>;
