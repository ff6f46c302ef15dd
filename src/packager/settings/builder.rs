//! Builder for constructing a PackageSpec programmatically.

use super::{
    LinuxSettings, MacOsSettings, PackageSettings, PackageSpec, TargetFormat, WindowsSettings,
};
use crate::packager::error::{Context, Error, Result};
use std::path::{Path, PathBuf};

/// Builder for [`PackageSpec`].
///
/// The JSON spec file is the usual source of a spec; this builder covers
/// library consumers and tests.
#[derive(Default)]
pub struct PackageSpecBuilder {
    target_format: Option<TargetFormat>,
    package: Option<PackageSettings>,
    files: Vec<PathBuf>,
    main_jar: Option<PathBuf>,
    main_class: Option<String>,
    launcher_args: Vec<String>,
    jvm_args: Vec<String>,
    icon: Option<PathBuf>,
    license_file: Option<PathBuf>,
    installation_dir: Option<String>,
    runtime_image: Option<PathBuf>,
    app_image: Option<PathBuf>,
    linux: LinuxSettings,
    macos: MacOsSettings,
    windows: WindowsSettings,
}

impl PackageSpecBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the distributable format to produce. Required.
    pub fn target_format(mut self, format: TargetFormat) -> Self {
        self.target_format = Some(format);
        self
    }

    /// Sets common package metadata. Required.
    pub fn package_settings(mut self, package: PackageSettings) -> Self {
        self.package = Some(package);
        self
    }

    /// Sets the input artifacts synchronized into the staging directory.
    pub fn files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    /// Sets the launcher jar. Required.
    pub fn main_jar<P: AsRef<Path>>(mut self, jar: P) -> Self {
        self.main_jar = Some(jar.as_ref().to_path_buf());
        self
    }

    /// Sets the launcher entry point. Required.
    pub fn main_class(mut self, class: impl Into<String>) -> Self {
        self.main_class = Some(class.into());
        self
    }

    pub fn launcher_args(mut self, args: Vec<String>) -> Self {
        self.launcher_args = args;
        self
    }

    pub fn jvm_args(mut self, args: Vec<String>) -> Self {
        self.jvm_args = args;
        self
    }

    pub fn icon<P: AsRef<Path>>(mut self, icon: P) -> Self {
        self.icon = Some(icon.as_ref().to_path_buf());
        self
    }

    pub fn license_file<P: AsRef<Path>>(mut self, license: P) -> Self {
        self.license_file = Some(license.as_ref().to_path_buf());
        self
    }

    pub fn installation_dir(mut self, dir: impl Into<String>) -> Self {
        self.installation_dir = Some(dir.into());
        self
    }

    pub fn runtime_image<P: AsRef<Path>>(mut self, image: P) -> Self {
        self.runtime_image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Sets a pre-built app image to package an installer from.
    pub fn app_image<P: AsRef<Path>>(mut self, image: P) -> Self {
        self.app_image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn linux(mut self, settings: LinuxSettings) -> Self {
        self.linux = settings;
        self
    }

    pub fn macos(mut self, settings: MacOsSettings) -> Self {
        self.macos = settings;
        self
    }

    pub fn windows(mut self, settings: WindowsSettings) -> Self {
        self.windows = settings;
        self
    }

    /// Builds the spec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when a required field is missing or
    /// the package name is empty.
    pub fn build(self) -> Result<PackageSpec> {
        let package = self.package.context("package_settings is required")?;
        if package.name.trim().is_empty() {
            return Err(Error::Configuration("package name must not be empty".into()));
        }

        Ok(PackageSpec {
            target_format: self.target_format.context("target_format is required")?,
            package,
            files: self.files,
            main_jar: self.main_jar.context("main_jar is required")?,
            main_class: self.main_class.context("main_class is required")?,
            launcher_args: self.launcher_args,
            jvm_args: self.jvm_args,
            icon: self.icon,
            license_file: self.license_file,
            installation_dir: self.installation_dir,
            runtime_image: self.runtime_image,
            app_image: self.app_image,
            linux: self.linux,
            macos: self.macos,
            windows: self.windows,
        })
    }
}
