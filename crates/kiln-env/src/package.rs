//! System package manager detection and linker install commands.

use std::fmt;

use crate::process::Invocation;

/// Executable the MinGW-w64 packages provide; cargo links Windows GNU targets with it.
pub const CROSS_LINKER: &str = "x86_64-w64-mingw32-gcc";

/// A system package manager able to install the cross linker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Apt,
    Pacman,
    Dnf,
    /// None of the known managers was found on `PATH`.
    Unknown,
}

impl PackageManager {
    /// Known managers in probe order. The first one present wins.
    pub const PRIORITY: [PackageManager; 3] =
        [PackageManager::Apt, PackageManager::Pacman, PackageManager::Dnf];

    /// Pick the first known manager whose executable `exists` reports present.
    pub fn detect<P>(exists: P) -> Self
    where
        P: Fn(&str) -> bool,
    {
        Self::PRIORITY
            .into_iter()
            .find(|pm| pm.executable().is_some_and(|exe| exists(exe)))
            .unwrap_or(PackageManager::Unknown)
    }

    /// Human-readable manager name.
    pub fn name(self) -> &'static str {
        match self {
            PackageManager::Apt => "apt",
            PackageManager::Pacman => "pacman",
            PackageManager::Dnf => "dnf",
            PackageManager::Unknown => "unknown",
        }
    }

    /// Executable probed for on `PATH`.
    pub fn executable(self) -> Option<&'static str> {
        match self {
            PackageManager::Apt => Some("apt-get"),
            PackageManager::Pacman => Some("pacman"),
            PackageManager::Dnf => Some("dnf"),
            PackageManager::Unknown => None,
        }
    }

    /// Package providing the MinGW-w64 GCC cross linker.
    pub fn linker_package(self) -> Option<&'static str> {
        match self {
            PackageManager::Apt => Some("gcc-mingw-w64-x86-64"),
            PackageManager::Pacman => Some("mingw-w64-gcc"),
            PackageManager::Dnf => Some("mingw64-gcc"),
            PackageManager::Unknown => None,
        }
    }

    /// Non-interactive install command for the linker package.
    ///
    /// `elevate` prefixes the command with `sudo`.
    pub fn install_invocation(self, elevate: bool) -> Option<Invocation> {
        let (exe, package) = (self.executable()?, self.linker_package()?);
        let inv = match self {
            PackageManager::Apt => Invocation::new(exe, ["install", "-y", package]),
            PackageManager::Pacman => {
                Invocation::new(exe, ["-S", "--needed", "--noconfirm", package])
            }
            PackageManager::Dnf => Invocation::new(exe, ["install", "-y", package]),
            PackageManager::Unknown => return None,
        };
        Some(if elevate { inv.elevated() } else { inv })
    }

    /// Comma-separated list of every probed executable, for diagnostics.
    pub fn searched() -> String {
        Self::PRIORITY
            .iter()
            .filter_map(|pm| pm.executable())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instructions printed when no package manager could be used.
pub fn manual_instructions() -> String {
    let mut text = format!(
        "Install a MinGW-w64 GCC toolchain providing `{CROSS_LINKER}` manually:\n"
    );
    for pm in PackageManager::PRIORITY {
        if let Some(inv) = pm.install_invocation(true) {
            text.push_str(&format!("  {:<8} {inv}\n", pm.name()));
        }
    }
    text
}
