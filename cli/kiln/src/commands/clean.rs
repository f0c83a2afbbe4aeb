//! `kiln clean`: remove collected artifacts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Remove the output directory.
pub fn run(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("removing {}", output_dir.display()))?;
        println!("Removed {}", output_dir.display());
    } else {
        println!("Already clean: {} does not exist", output_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("obj2brs-linux-x86_64"), b"data").unwrap();

        run(&out).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn clean_handles_already_clean() {
        let dir = tempfile::tempdir().unwrap();
        run(&dir.path().join("dist")).unwrap();
    }
}
