//! `kiln targets`: list or describe the built-in target platforms.

use anyhow::Result;
use kiln_targets::TargetPlatform;

/// Print every built-in target in build order.
///
/// Artifact names use `project` when known, `{project}` otherwise.
pub fn list(project: Option<&str>) -> Result<()> {
    let project = project.unwrap_or("{project}");
    println!("Built-in targets (build order):");
    println!();
    for (i, target) in TargetPlatform::builtin().iter().enumerate() {
        println!(
            "  {}. {:<16} {:<28} -> {}",
            i + 1,
            target.name(),
            target.triple,
            target.artifact_name(project)
        );
    }
    println!();
    println!("Use 'kiln targets <name>' for details.");
    Ok(())
}

/// Describe one built-in target, looked up by short name or triple.
pub fn describe(name: &str, project: Option<&str>) -> Result<()> {
    let target = TargetPlatform::resolve(name)?;
    let project = project.unwrap_or("{project}");
    let position = TargetPlatform::builtin()
        .iter()
        .position(|t| t == &target)
        .map_or(0, |i| i + 1);

    println!("=== Target: {target} ===");
    println!("  Triple:          {}", target.triple);
    println!("  OS:              {}", target.os.as_str());
    println!("  Architecture:    {}", target.arch);
    println!(
        "  Executable ext:  {}",
        if target.exe_suffix().is_empty() {
            "(none)"
        } else {
            target.exe_suffix()
        }
    );
    println!("  Build order:     {position}");
    println!("  Artifact:        {}", target.artifact_name(project));
    Ok(())
}
