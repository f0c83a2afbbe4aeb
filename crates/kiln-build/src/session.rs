//! Build session configuration and lifecycle states.

use std::fmt;
use std::path::PathBuf;

use kiln_targets::TargetPlatform;

/// Everything one build session needs. Lives for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Prefix of every artifact filename.
    pub project: String,
    /// Flat directory receiving the artifacts.
    pub output_dir: PathBuf,
    /// Targets to build, in build order.
    pub targets: Vec<TargetPlatform>,
}

impl BuildConfig {
    /// A session over the built-in target list.
    pub fn new(project: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            output_dir: output_dir.into(),
            targets: TargetPlatform::builtin(),
        }
    }

    /// Replace the target list.
    pub fn with_targets(mut self, targets: Vec<TargetPlatform>) -> Self {
        self.targets = targets;
        self
    }

    /// Destination path of the artifact for `target`.
    pub fn artifact_path(&self, target: &TargetPlatform) -> PathBuf {
        self.output_dir.join(target.artifact_name(&self.project))
    }
}

/// Where a session is in its lifecycle.
///
/// Indices refer to positions in [`BuildConfig::targets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PreparingOutputDir,
    BuildingTarget(usize),
    CopyingArtifact(usize),
    Done,
    Failed(String),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Done | SessionState::Failed(_))
    }

    /// Whether moving from `self` to `next` is a legal step.
    pub fn can_transition_to(&self, next: &SessionState) -> bool {
        use SessionState::*;
        match (self, next) {
            (Done | Failed(_), _) => false,
            (_, Failed(_)) => true,
            (Idle, PreparingOutputDir) => true,
            (PreparingOutputDir, BuildingTarget(0)) => true,
            (PreparingOutputDir, Done) => true,
            (BuildingTarget(i), CopyingArtifact(j)) => i == j,
            (CopyingArtifact(i), BuildingTarget(j)) => *j == i + 1,
            (CopyingArtifact(_), Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => f.write_str("idle"),
            SessionState::PreparingOutputDir => f.write_str("preparing output directory"),
            SessionState::BuildingTarget(i) => write!(f, "building target #{}", i + 1),
            SessionState::CopyingArtifact(i) => write!(f, "copying artifact #{}", i + 1),
            SessionState::Done => f.write_str("done"),
            SessionState::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}
