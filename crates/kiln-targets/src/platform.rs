//! Target platform model.
//!
//! Platforms are statically enumerated; nothing here probes the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// Operating system family of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsFamily {
    Linux,
    Windows,
}

impl OsFamily {
    /// Lowercase name used in artifact filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Windows => "windows",
        }
    }

    /// Suffix the compiler appends to executables for this OS.
    pub fn exe_suffix(self) -> &'static str {
        match self {
            OsFamily::Linux => "",
            OsFamily::Windows => ".exe",
        }
    }
}

/// A platform the project is compiled for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetPlatform {
    /// Compiler target triple (e.g., "x86_64-pc-windows-gnu").
    pub triple: String,
    /// Operating system family.
    pub os: OsFamily,
    /// Architecture name as it appears in artifact filenames.
    pub arch: String,
}

impl TargetPlatform {
    /// Construct a platform from its parts.
    pub fn new(triple: impl Into<String>, os: OsFamily, arch: impl Into<String>) -> Self {
        Self {
            triple: triple.into(),
            os,
            arch: arch.into(),
        }
    }

    /// Native 64-bit Linux.
    pub fn linux_x86_64() -> Self {
        Self::new("x86_64-unknown-linux-gnu", OsFamily::Linux, "x86_64")
    }

    /// 64-bit Windows, cross-compiled with the MinGW-w64 linker.
    pub fn windows_x86_64() -> Self {
        Self::new("x86_64-pc-windows-gnu", OsFamily::Windows, "x86_64")
    }

    /// The fixed list of platforms every build session produces, in build order.
    pub fn builtin() -> Vec<Self> {
        vec![Self::linux_x86_64(), Self::windows_x86_64()]
    }

    /// Resolve a built-in platform by short name ("linux-x86_64") or triple.
    pub fn resolve(name: &str) -> Result<Self> {
        Self::builtin()
            .into_iter()
            .find(|p| p.name() == name || p.triple == name)
            .ok_or_else(|| TargetError::UnknownTarget {
                name: name.to_string(),
            })
    }

    /// Short platform name, `{os}-{arch}`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.os.as_str(), self.arch)
    }

    /// Executable suffix: empty on Unix-like targets, `.exe` on Windows.
    pub fn exe_suffix(&self) -> &'static str {
        self.os.exe_suffix()
    }

    /// Filename the compiler gives the executable for `binary`.
    pub fn compiler_output_name(&self, binary: &str) -> String {
        format!("{binary}{}", self.exe_suffix())
    }

    /// Canonical artifact filename: `{project}-{os}-{arch}{ext}`.
    pub fn artifact_name(&self, project: &str) -> String {
        format!("{project}-{}{}", self.name(), self.exe_suffix())
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_linux_then_windows() {
        let names: Vec<String> = TargetPlatform::builtin().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["linux-x86_64", "windows-x86_64"]);
    }

    #[test]
    fn artifact_names() {
        assert_eq!(
            TargetPlatform::linux_x86_64().artifact_name("obj2brs"),
            "obj2brs-linux-x86_64"
        );
        assert_eq!(
            TargetPlatform::windows_x86_64().artifact_name("obj2brs"),
            "obj2brs-windows-x86_64.exe"
        );
    }

    #[test]
    fn compiler_output_names() {
        assert_eq!(TargetPlatform::linux_x86_64().compiler_output_name("obj2brs"), "obj2brs");
        assert_eq!(
            TargetPlatform::windows_x86_64().compiler_output_name("obj2brs"),
            "obj2brs.exe"
        );
    }

    #[test]
    fn resolve_by_name_or_triple() {
        assert_eq!(
            TargetPlatform::resolve("windows-x86_64").unwrap(),
            TargetPlatform::windows_x86_64()
        );
        assert_eq!(
            TargetPlatform::resolve("x86_64-unknown-linux-gnu").unwrap(),
            TargetPlatform::linux_x86_64()
        );
    }

    #[test]
    fn resolve_unknown() {
        let err = TargetPlatform::resolve("stm32f407-discovery").unwrap_err();
        assert!(matches!(err, TargetError::UnknownTarget { ref name } if name == "stm32f407-discovery"));
    }

    #[test]
    fn display_uses_short_name() {
        assert_eq!(TargetPlatform::windows_x86_64().to_string(), "windows-x86_64");
    }
}
