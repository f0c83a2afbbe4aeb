//! CLI command implementations.

pub mod build;
pub mod clean;
pub mod doctor;
pub mod prepare;
pub mod targets;
