//! `kiln.toml` manifest parsing and project resolution.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the manifest searched for above the working directory.
pub const MANIFEST_FILE: &str = "kiln.toml";

/// The top-level `kiln.toml` structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KilnManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Output placement.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Artifact filename prefix.
    pub name: String,
    /// Cargo binary target to build; defaults to `name`.
    #[serde(default)]
    pub binary: Option<String>,
}

/// Output section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact directory, relative to the manifest directory.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// The slice of `Cargo.toml` used when there is no `kiln.toml`.
#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: String,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Artifact filename prefix.
    pub name: String,
    /// Cargo binary target.
    pub binary: String,
    /// Directory cargo runs in.
    pub root: PathBuf,
    /// Absolute artifact directory.
    pub output_dir: PathBuf,
}

impl KilnManifest {
    /// Search upward from `start_dir` for a `kiln.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: KilnManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing kiln.toml")
    }

    /// Resolve settings relative to the directory the manifest lives in.
    pub fn settings(&self, dir: &Path) -> ProjectSettings {
        let name = self.project.name.clone();
        ProjectSettings {
            binary: self.project.binary.clone().unwrap_or_else(|| name.clone()),
            name,
            root: dir.to_path_buf(),
            output_dir: dir.join(&self.output.dir),
        }
    }
}

impl ProjectSettings {
    /// Resolve from `kiln.toml` (searched upward) or, failing that, the
    /// package name in `cwd/Cargo.toml`.
    pub fn resolve(cwd: &Path) -> Result<Self> {
        if let Some((manifest, dir)) = KilnManifest::find_and_load(cwd)? {
            return Ok(manifest.settings(&dir));
        }

        let cargo_toml = cwd.join("Cargo.toml");
        if !cargo_toml.is_file() {
            bail!(
                "no {MANIFEST_FILE} found above {} and no Cargo.toml in it",
                cwd.display()
            );
        }
        let content = std::fs::read_to_string(&cargo_toml)
            .with_context(|| format!("reading {}", cargo_toml.display()))?;
        let cargo: CargoManifest = toml::from_str(&content)
            .with_context(|| format!("parsing {}", cargo_toml.display()))?;
        let Some(package) = cargo.package else {
            bail!(
                "{} has no [package] section; add a {MANIFEST_FILE} naming the project",
                cargo_toml.display()
            );
        };

        Ok(Self {
            binary: package.name.clone(),
            name: package.name,
            root: cwd.to_path_buf(),
            output_dir: cwd.join(default_output_dir()),
        })
    }
}
