//! `kiln build`: compile all built-in targets and collect the binaries.

use anyhow::{Context, Result};
use kiln_build::{BuildConfig, CargoCompiler, Orchestrator};

use crate::manifest::ProjectSettings;

/// Session configuration for `settings`. The target list is always the built-in one.
pub fn session_config(settings: &ProjectSettings) -> BuildConfig {
    BuildConfig::new(settings.name.clone(), settings.output_dir.clone())
}

/// Run one build session with cargo as the compiler.
pub fn run(settings: &ProjectSettings) -> Result<()> {
    let config = session_config(settings);
    let compiler = CargoCompiler::new(&settings.root, settings.binary.clone());
    let mut orchestrator = Orchestrator::new(compiler);
    orchestrator
        .run(&config)
        .with_context(|| format!("building {} failed", settings.name))?;
    Ok(())
}
