//! Package description consumed by the packaging pipeline.

use super::{LinuxSettings, MacOsSettings, TargetFormat, WindowsSettings};
use crate::packager::error::{ErrorExt, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Common package metadata shared by every target format.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PackageSettings {
    /// Application name, shown to the user by the installer
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Version string passed to jpackage `--app-version`
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub vendor: Option<String>,

    #[serde(default)]
    pub copyright: Option<String>,
}

/// Full description of one packaging run.
///
/// Produced by the configuration layer (JSON spec file or
/// [`PackageSpecBuilder`](super::PackageSpecBuilder)) and treated as
/// read-only by the pipeline.
#[derive(Clone, Debug, Deserialize)]
pub struct PackageSpec {
    /// Distributable format to produce
    pub target_format: TargetFormat,

    /// Common package metadata
    pub package: PackageSettings,

    /// Artifacts synchronized into the staging directory (launcher jar
    /// excluded; it is tracked separately via `main_jar`)
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// The launcher jar; synchronized and processed like every other input
    pub main_jar: PathBuf,

    /// Fully qualified launcher entry point
    pub main_class: String,

    /// Arguments baked into the launcher (`--arguments`, repeated)
    #[serde(default)]
    pub launcher_args: Vec<String>,

    /// JVM options baked into the launcher (`--java-options`, repeated)
    #[serde(default)]
    pub jvm_args: Vec<String>,

    #[serde(default)]
    pub icon: Option<PathBuf>,

    #[serde(default)]
    pub license_file: Option<PathBuf>,

    /// Absolute install location on the target machine (`--install-dir`)
    #[serde(default)]
    pub installation_dir: Option<String>,

    /// Trimmed runtime image produced by jlink (`--runtime-image`)
    #[serde(default)]
    pub runtime_image: Option<PathBuf>,

    /// Pre-built app image to package an installer from (`--app-image`).
    /// When set and the target is an installer, the build-from-scratch
    /// arguments are not emitted.
    #[serde(default)]
    pub app_image: Option<PathBuf>,

    #[serde(default)]
    pub linux: LinuxSettings,

    #[serde(default)]
    pub macos: MacOsSettings,

    #[serde(default)]
    pub windows: WindowsSettings,
}

impl PackageSpec {
    /// Every input that goes through the synchronizer, launcher jar included.
    pub fn inputs(&self) -> Vec<PathBuf> {
        let mut inputs = self.files.clone();
        if !inputs.contains(&self.main_jar) {
            inputs.push(self.main_jar.clone());
        }
        inputs
    }

    /// Loads a spec from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading package spec", path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
