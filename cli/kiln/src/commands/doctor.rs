//! `kiln doctor`: toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;
use kiln_env::package::CROSS_LINKER;
use kiln_env::process::{command_exists, locate};
use kiln_env::PackageManager;
use kiln_targets::TargetPlatform;

use crate::manifest::ProjectSettings;

/// Print toolchain and project diagnostics. Never fails on missing tools.
pub fn run(cwd: &Path) -> Result<()> {
    println!("=== Kiln Doctor ===");
    println!();

    println!("Kiln version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Toolchain ---");
    for tool in ["cargo", "rustup", CROSS_LINKER] {
        println!("  {}", tool_status(tool));
    }
    println!();

    println!("--- Installed targets ---");
    let installed = installed_targets();
    for target in TargetPlatform::builtin() {
        let state = match &installed {
            Some(list) if list.iter().any(|t| t == &target.triple) => "installed",
            Some(_) => "missing (run `kiln prepare`)",
            None => "unknown (rustup unavailable)",
        };
        println!("  {:<16} {}", target.name(), state);
    }
    println!();

    println!("--- Package manager ---");
    match PackageManager::detect(command_exists) {
        PackageManager::Unknown => {
            println!("  none found (looked for {})", PackageManager::searched());
        }
        pm => println!("  {pm}"),
    }
    println!();

    println!("--- Project ---");
    match ProjectSettings::resolve(cwd) {
        Ok(settings) => {
            println!("  Name:   {}", settings.name);
            println!("  Binary: {}", settings.binary);
            println!("  Root:   {}", settings.root.display());
            println!("  Output: {}", settings.output_dir.display());
        }
        Err(e) => println!("  not resolved: {e:#}"),
    }

    Ok(())
}

/// One-line status for `tool`: where it lives and what `--version` says.
fn tool_status(tool: &str) -> String {
    let Some(path) = locate(tool) else {
        return format!("{tool}: not found");
    };
    let version = Command::new(&path)
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| {
            String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .map(str::to_string)
        })
        .unwrap_or_else(|| "(unknown version)".to_string());
    format!("{tool}: {version} [{}]", path.display())
}

/// Triples reported by `rustup target list --installed`, if rustup runs.
fn installed_targets() -> Option<Vec<String>> {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(stdout.lines().map(|l| l.trim().to_string()).collect())
}
