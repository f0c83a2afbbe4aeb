//! `kiln build`: compile every target in order and collect the artifacts.

use std::fs;
use std::path::PathBuf;

use kiln_targets::TargetPlatform;
use tracing::{debug, error, info};

use crate::artifact::{self, OutputEntry};
use crate::compiler::Compiler;
use crate::error::{BuildError, Result};
use crate::session::{BuildConfig, SessionState};

/// An executable placed in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub target: TargetPlatform,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Outcome of a successful session.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// One entry per target, in build order.
    pub artifacts: Vec<Artifact>,
    /// Contents of the output directory after the last copy.
    pub listing: Vec<OutputEntry>,
}

/// Runs build sessions against a [`Compiler`].
///
/// Targets are built one at a time; compiler invocations never overlap.
pub struct Orchestrator<C> {
    compiler: C,
    state: SessionState,
    history: Vec<SessionState>,
}

impl<C: Compiler> Orchestrator<C> {
    pub fn new(compiler: C) -> Self {
        Self {
            compiler,
            state: SessionState::Idle,
            history: vec![SessionState::Idle],
        }
    }

    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Every state visited by the current or most recent session, starting with `Idle`.
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    /// Run one session. Stops at the first failing target.
    ///
    /// An orchestrator can run any number of sessions; each starts from `Idle`.
    pub fn run(&mut self, config: &BuildConfig) -> Result<BuildReport> {
        if self.state.is_terminal() {
            self.state = SessionState::Idle;
            self.history = vec![SessionState::Idle];
        }

        println!(
            "=== Building {} for {} target(s) ===",
            config.project,
            config.targets.len()
        );
        println!();

        match self.run_session(config) {
            Ok(report) => {
                self.transition(SessionState::Done);
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "build session failed");
                println!("FAILED: {e}");
                self.transition(SessionState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn run_session(&mut self, config: &BuildConfig) -> Result<BuildReport> {
        self.transition(SessionState::PreparingOutputDir);
        fs::create_dir_all(&config.output_dir).map_err(|source| BuildError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;
        for target in &config.targets {
            let path = config.artifact_path(target);
            artifact::remove_previous(&path)
                .map_err(|source| BuildError::PreviousArtifact { path, source })?;
        }

        let total = config.targets.len();
        let mut artifacts = Vec::with_capacity(total);
        for (i, target) in config.targets.iter().enumerate() {
            println!("--- [{}/{total}] {target} ({}) ---", i + 1, target.triple);
            artifacts.push(self.build_one(config, i, target)?);
        }

        let listing =
            artifact::list_output_dir(&config.output_dir).map_err(|source| BuildError::OutputDir {
                path: config.output_dir.clone(),
                source,
            })?;

        println!();
        println!("Artifacts in {}:", config.output_dir.display());
        for entry in &listing {
            println!("  {:<40} {:>12} bytes", entry.name, entry.bytes);
        }
        println!();
        println!("Build succeeded.");

        Ok(BuildReport { artifacts, listing })
    }

    fn build_one(
        &mut self,
        config: &BuildConfig,
        index: usize,
        target: &TargetPlatform,
    ) -> Result<Artifact> {
        self.transition(SessionState::BuildingTarget(index));
        let produced = self
            .compiler
            .compile(target)
            .map_err(|source| BuildError::CompilationFailed {
                target: target.name(),
                source,
            })?;

        self.transition(SessionState::CopyingArtifact(index));
        if !produced.is_file() {
            return Err(BuildError::ArtifactMissing {
                target: target.name(),
                path: produced,
            });
        }

        let dest = config.artifact_path(target);
        let name = target.artifact_name(&config.project);
        let bytes = artifact::install_artifact(&produced, &config.output_dir, &name).map_err(
            |source| BuildError::ArtifactCopyFailed {
                target: target.name(),
                path: dest.clone(),
                source,
            },
        )?;

        info!(platform = %target, artifact = %dest.display(), bytes, "target built");
        println!("  -> {}", dest.display());
        Ok(Artifact {
            target: target.clone(),
            path: dest,
            bytes,
        })
    }

    fn transition(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "illegal session transition: {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "session transition");
        self.state = next.clone();
        self.history.push(next);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::CompileError;

    /// Writes a fake executable per target under `root`.
    struct FakeCargo {
        root: PathBuf,
        calls: RefCell<Vec<String>>,
    }

    impl Compiler for FakeCargo {
        fn compile(&self, target: &TargetPlatform) -> std::result::Result<PathBuf, CompileError> {
            self.calls.borrow_mut().push(target.name());
            let dir = self.root.join(&target.triple).join("release");
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join(target.compiler_output_name("app"));
            fs::write(&path, target.triple.as_bytes()).unwrap();
            Ok(path)
        }
    }

    #[test]
    fn records_full_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = FakeCargo {
            root: dir.path().join("target"),
            calls: RefCell::new(Vec::new()),
        };
        let mut orch = Orchestrator::new(compiler);
        let config = BuildConfig::new("app", dir.path().join("dist"));

        let report = orch.run(&config).unwrap();

        use SessionState::*;
        assert_eq!(
            orch.history(),
            [
                Idle,
                PreparingOutputDir,
                BuildingTarget(0),
                CopyingArtifact(0),
                BuildingTarget(1),
                CopyingArtifact(1),
                Done,
            ]
        );
        assert_eq!(report.artifacts.len(), 2);
        assert_eq!(report.artifacts[1].bytes, "x86_64-pc-windows-gnu".len() as u64);
        assert_eq!(
            orch.compiler().calls.borrow().as_slice(),
            ["linux-x86_64", "windows-x86_64"]
        );
    }

    #[test]
    fn second_run_starts_a_fresh_history() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = FakeCargo {
            root: dir.path().join("target"),
            calls: RefCell::new(Vec::new()),
        };
        let mut orch = Orchestrator::new(compiler);
        let config = BuildConfig::new("app", dir.path().join("dist"));

        orch.run(&config).unwrap();
        let first = orch.history().to_vec();
        orch.run(&config).unwrap();

        assert_eq!(orch.history(), first.as_slice());
        assert_eq!(orch.history()[0], SessionState::Idle);
        assert_eq!(orch.compiler().calls.borrow().len(), 4);
    }

    #[test]
    fn failed_session_does_not_block_the_next() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("dist");
        fs::write(&blocker, b"not a directory").unwrap();
        let compiler = FakeCargo {
            root: dir.path().join("target"),
            calls: RefCell::new(Vec::new()),
        };
        let mut orch = Orchestrator::new(compiler);
        let config = BuildConfig::new("app", &blocker);

        orch.run(&config).unwrap_err();
        fs::remove_file(&blocker).unwrap();
        orch.run(&config).unwrap();

        assert_eq!(orch.state(), &SessionState::Done);
        assert!(!orch
            .history()
            .iter()
            .any(|s| matches!(s, SessionState::Failed(_))));
    }

    #[test]
    fn empty_target_list_still_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = FakeCargo {
            root: dir.path().join("target"),
            calls: RefCell::new(Vec::new()),
        };
        let mut orch = Orchestrator::new(compiler);
        let config = BuildConfig::new("app", dir.path().join("dist")).with_targets(Vec::new());

        let report = orch.run(&config).unwrap();

        assert!(report.artifacts.is_empty());
        assert!(report.listing.is_empty());
        assert!(dir.path().join("dist").is_dir());
        assert_eq!(orch.state(), &SessionState::Done);
    }

    #[test]
    fn unusable_output_dir_fails_before_compiling() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("dist");
        fs::write(&blocker, b"not a directory").unwrap();
        let compiler = FakeCargo {
            root: dir.path().join("target"),
            calls: RefCell::new(Vec::new()),
        };
        let mut orch = Orchestrator::new(compiler);

        let err = orch.run(&BuildConfig::new("app", &blocker)).unwrap_err();

        assert!(matches!(err, BuildError::OutputDir { .. }));
        assert!(err.target().is_none());
        assert!(orch.compiler().calls.borrow().is_empty());
        assert!(matches!(orch.state(), SessionState::Failed(_)));
    }
}
