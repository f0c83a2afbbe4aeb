//! Error types for target platform lookups.

/// Errors that can occur when resolving target platforms.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// No built-in platform carries this name or triple.
    #[error("unknown target: '{name}'")]
    UnknownTarget {
        /// The name that failed to resolve.
        name: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
