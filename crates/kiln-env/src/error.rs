//! Environment preparation errors.

/// Errors that can occur while preparing the host toolchain.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// A helper executable could not be launched at all.
    #[error("failed to launch `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// `rustup target add` exited unsuccessfully.
    #[error("failed to register target {target} with the toolchain: `{command}` exited with {status}")]
    SetupToolchain {
        target: String,
        command: String,
        status: String,
    },

    /// None of the known package managers is installed.
    #[error("no supported package manager found (looked for {searched})")]
    PackageManagerNotFound { searched: String },

    /// The package manager's install command exited unsuccessfully.
    #[error("{manager} failed to install the cross linker: `{command}` exited with {status}")]
    PackageInstallFailed {
        manager: &'static str,
        command: String,
        status: String,
    },
}

impl EnvironmentError {
    /// Whether this error must abort setup with a non-zero exit.
    ///
    /// `PackageManagerNotFound` is the only soft failure.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, EnvironmentError::PackageManagerNotFound { .. })
    }
}

/// Result type for environment preparation.
pub type Result<T> = std::result::Result<T, EnvironmentError>;
