//! Target formats and host platform detection.

use crate::packager::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Native distributable formats produced by jpackage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetFormat {
    /// Self-contained, unpacked application bundle (not an installer)
    AppImage,
    /// Debian package
    Deb,
    /// RPM package
    Rpm,
    /// macOS disk image
    Dmg,
    /// macOS installer package
    Pkg,
    /// Windows EXE installer
    Exe,
    /// Windows MSI installer
    Msi,
}

impl TargetFormat {
    /// Value passed to jpackage `--type`.
    pub fn id(self) -> &'static str {
        match self {
            TargetFormat::AppImage => "app-image",
            TargetFormat::Deb => "deb",
            TargetFormat::Rpm => "rpm",
            TargetFormat::Dmg => "dmg",
            TargetFormat::Pkg => "pkg",
            TargetFormat::Exe => "exe",
            TargetFormat::Msi => "msi",
        }
    }

    /// File extension of the produced artifact. App images are directories
    /// and carry no extension.
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::AppImage => "",
            other => other.id(),
        }
    }

    /// Whether jpackage can produce this format on the given host platform.
    pub fn is_compatible_with(self, os: Platform) -> bool {
        match self {
            TargetFormat::AppImage => true,
            TargetFormat::Deb | TargetFormat::Rpm => os == Platform::Linux,
            TargetFormat::Dmg | TargetFormat::Pkg => os == Platform::MacOs,
            TargetFormat::Exe | TargetFormat::Msi => os == Platform::Windows,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Host operating system a packaging run targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
}

impl Platform {
    /// Detects the host platform.
    pub fn current() -> Result<Self> {
        if cfg!(target_os = "linux") {
            Ok(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Ok(Platform::MacOs)
        } else if cfg!(target_os = "windows") {
            Ok(Platform::Windows)
        } else {
            Err(Error::Configuration(format!(
                "unsupported host platform: {}",
                std::env::consts::OS
            )))
        }
    }
}
