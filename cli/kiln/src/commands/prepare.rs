//! `kiln prepare`: make the host able to build every target.

use anyhow::{Context, Result};
use kiln_env::{LinkerStatus, Preparer};
use kiln_targets::TargetPlatform;

/// Register the built-in targets and install the cross linker.
///
/// A host without a known package manager still succeeds; the operator gets
/// manual install instructions instead.
pub fn run() -> Result<()> {
    let report = Preparer::system(TargetPlatform::builtin())
        .prepare()
        .context("environment preparation failed")?;

    if report.linker == LinkerStatus::ManualInstallRequired {
        println!("Cross linker not installed automatically; see the instructions above.");
    }
    Ok(())
}
