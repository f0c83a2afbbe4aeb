//! Host environment preparation for kiln.
//!
//! Registers the build targets with `rustup` and installs the MinGW-w64
//! cross linker through whichever system package manager is present.
//! Every subprocess goes through [`process::CommandRunner`] and every
//! executable lookup through an injected probe, so the sequencing can be
//! exercised without touching the host.

pub mod error;
pub mod package;
pub mod prepare;
pub mod process;

pub use error::{EnvironmentError, Result};
pub use package::PackageManager;
pub use prepare::{LinkerStatus, PrepareReport, Preparer};
pub use process::{CommandRunner, Invocation, RunStatus, SystemRunner};
