//! Build orchestration for kiln.
//!
//! Compiles one project for every configured target, strictly in order,
//! and copies each produced executable into a flat output directory under
//! `{project}-{os}-{arch}{ext}`. Artifacts a previous session left for the
//! configured targets are removed first, so after a failure the directory
//! holds only what this session built. The first failure ends the session;
//! files already placed stay where they are.

pub mod artifact;
pub mod compiler;
pub mod error;
pub mod orchestrator;
pub mod session;

pub use artifact::{install_artifact, list_output_dir, remove_previous, OutputEntry};
pub use compiler::{CargoCompiler, Compiler};
pub use error::{BuildError, CompileError, Result};
pub use orchestrator::{Artifact, BuildReport, Orchestrator};
pub use session::{BuildConfig, SessionState};
