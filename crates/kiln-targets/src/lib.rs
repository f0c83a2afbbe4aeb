//! Target platform definitions for kiln.
//!
//! A target platform pairs a compiler triple with the OS/architecture names
//! used to derive the canonical artifact filename:
//! `{project}-{os}-{arch}{ext}`.

pub mod error;
pub mod platform;

pub use error::{Result, TargetError};
pub use platform::{OsFamily, TargetPlatform};
