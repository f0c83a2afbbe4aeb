//! `kiln prepare`: register targets and install the cross linker.

use kiln_targets::TargetPlatform;
use tracing::{info, warn};

use crate::error::{EnvironmentError, Result};
use crate::package::{self, PackageManager};
use crate::process::{command_exists, CommandRunner, Invocation, RunStatus, SystemRunner};

/// What happened to the cross linker during preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkerStatus {
    /// Installed (or confirmed present) through a package manager.
    Installed { manager: PackageManager },
    /// No package manager was found; the operator has to install it.
    ManualInstallRequired,
}

/// Outcome of a successful [`Preparer::prepare`] run.
#[derive(Debug, Clone)]
pub struct PrepareReport {
    /// Targets registered with the toolchain, in order.
    pub registered: Vec<TargetPlatform>,
    pub linker: LinkerStatus,
}

/// Prepares the host toolchain for every target in a build session.
pub struct Preparer<R, P> {
    targets: Vec<TargetPlatform>,
    runner: R,
    exists: P,
}

impl Preparer<SystemRunner, fn(&str) -> bool> {
    /// A preparer that runs real subprocesses and looks executables up on `PATH`.
    pub fn system(targets: Vec<TargetPlatform>) -> Self {
        Self::new(targets, SystemRunner, command_exists)
    }
}

impl<R, P> Preparer<R, P>
where
    R: CommandRunner,
    P: Fn(&str) -> bool,
{
    /// Build a preparer from its collaborators.
    ///
    /// `exists` answers whether an executable is available; it drives both
    /// package manager detection and the `sudo` decision.
    pub fn new(targets: Vec<TargetPlatform>, runner: R, exists: P) -> Self {
        Self {
            targets,
            runner,
            exists,
        }
    }

    /// The subprocess runner this preparer drives.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run every setup step in order.
    ///
    /// Safe to run repeatedly: `rustup target add` succeeds for targets that
    /// are already installed, and the package managers are asked for
    /// idempotent installs.
    pub fn prepare(&self) -> Result<PrepareReport> {
        println!("=== Preparing build environment ===");
        println!();

        println!("--- Registering targets ---");
        for target in &self.targets {
            self.register_target(target)?;
        }
        println!();

        println!("--- Installing cross linker ---");
        let linker = match self.install_linker() {
            Ok(manager) => LinkerStatus::Installed { manager },
            Err(e) if !e.is_fatal() => {
                warn!(error = %e, "skipping cross linker install");
                println!("  {e}");
                println!();
                print!("{}", package::manual_instructions());
                LinkerStatus::ManualInstallRequired
            }
            Err(e) => {
                println!("  FAILED: {e}");
                return Err(e);
            }
        };
        println!();
        println!("Environment ready.");

        Ok(PrepareReport {
            registered: self.targets.clone(),
            linker,
        })
    }

    /// Register one target with `rustup`.
    pub fn register_target(&self, target: &TargetPlatform) -> Result<()> {
        let inv = Invocation::new("rustup", ["target", "add", target.triple.as_str()]);
        println!("  {target}: {inv}");
        let status = self.launch(&inv)?;
        if !status.success() {
            println!("  FAILED: {target}");
            return Err(EnvironmentError::SetupToolchain {
                target: target.triple.clone(),
                command: inv.to_string(),
                status: status.to_string(),
            });
        }
        info!(triple = %target.triple, "target registered");
        Ok(())
    }

    /// Detect the package manager and install the linker with it.
    pub fn install_linker(&self) -> Result<PackageManager> {
        let manager = PackageManager::detect(&self.exists);
        let elevate = (self.exists)("sudo");
        let Some(inv) = manager.install_invocation(elevate) else {
            return Err(EnvironmentError::PackageManagerNotFound {
                searched: PackageManager::searched(),
            });
        };

        info!(manager = manager.name(), "package manager detected");
        println!("  Using {manager}: {inv}");
        let status = self.launch(&inv)?;
        if !status.success() {
            return Err(EnvironmentError::PackageInstallFailed {
                manager: manager.name(),
                command: inv.to_string(),
                status: status.to_string(),
            });
        }
        Ok(manager)
    }

    fn launch(&self, inv: &Invocation) -> Result<RunStatus> {
        self.runner
            .run(inv)
            .map_err(|source| EnvironmentError::Spawn {
                program: inv.program.clone(),
                source,
            })
    }
}
