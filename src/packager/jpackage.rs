//! jpackage command construction and tool resolution.

use crate::packager::error::{Error, Result};
use crate::packager::settings::{PackageSpec, Platform, TargetFormat};
use std::path::{Path, PathBuf};

/// Builds the full jpackage argument list for one packaging run.
///
/// Pure translation: no filesystem access, no tool calls. Two argument
/// subsets exist: the build-from-scratch set (app image target, or no
/// pre-built app image supplied) and the installer set (any installer
/// target). Building an installer without a pre-built app image emits both.
/// Signing settings are validated before the first argument is emitted.
pub fn jpackage_args(
    spec: &PackageSpec,
    os: Platform,
    staging_dir: &Path,
    destination_dir: &Path,
    verbose: bool,
) -> Result<Vec<String>> {
    let signing = spec.macos.validated_signing(os, &spec.package)?;

    let mut args = Args::default();

    if spec.target_format == TargetFormat::AppImage || spec.app_image.is_none() {
        args.path("--input", Some(staging_dir))?;
        args.path("--runtime-image", spec.runtime_image.as_deref())?;
        args.opt("--main-jar", Some(main_jar_name(spec)?));
        args.opt("--main-class", Some(spec.main_class.as_str()));

        if os == Platform::Windows {
            args.flag("--win-console", spec.windows.console);
        }
        args.path("--icon", spec.icon.as_deref())?;
        for argument in &spec.launcher_args {
            args.opt("--arguments", Some(argument.as_str()));
        }
        for option in &spec.jvm_args {
            args.opt("--java-options", Some(option.as_str()));
        }
    }

    if spec.target_format != TargetFormat::AppImage {
        args.path("--app-image", spec.app_image.as_deref())?;
        args.opt("--install-dir", spec.installation_dir.as_deref());
        args.path("--license-file", spec.license_file.as_deref())?;

        match os {
            Platform::Linux => {
                args.flag("--linux-shortcut", spec.linux.shortcut);
                args.opt("--linux-package-name", spec.linux.package_name.as_deref());
                args.opt("--linux-app-release", spec.linux.app_release.as_deref());
                args.opt("--linux-app-category", spec.linux.app_category.as_deref());
                args.opt("--linux-deb-maintainer", spec.linux.deb_maintainer.as_deref());
                args.opt("--linux-menu-group", spec.linux.menu_group.as_deref());
                args.opt(
                    "--linux-rpm-license-type",
                    spec.linux.rpm_license_type.as_deref(),
                );
            }
            Platform::Windows => {
                args.flag("--win-dir-chooser", spec.windows.dir_chooser);
                args.flag("--win-per-user-install", spec.windows.per_user_install);
                args.flag("--win-shortcut", spec.windows.shortcut);
                args.flag("--win-menu", spec.windows.menu);
                args.opt("--win-menu-group", spec.windows.menu_group.as_deref());
                args.opt("--win-upgrade-uuid", spec.windows.upgrade_uuid.as_deref());
            }
            Platform::MacOs => {}
        }
    }

    args.opt("--type", Some(spec.target_format.id()));
    args.path("--dest", Some(destination_dir))?;
    args.flag("--verbose", Some(verbose));

    args.opt("--name", Some(spec.package.name.as_str()));
    args.opt("--description", spec.package.description.as_deref());
    args.opt("--copyright", spec.package.copyright.as_deref());
    args.opt("--app-version", spec.package.version.as_deref());
    args.opt("--vendor", spec.package.vendor.as_deref());

    if os == Platform::MacOs {
        args.opt("--mac-package-name", spec.macos.package_name.as_deref());
        args.opt("--mac-package-identifier", spec.macos.bundle_id.as_deref());

        if let Some(signing) = &signing {
            args.flag("--mac-sign", Some(true));
            args.opt("--mac-signing-key-user-name", Some(signing.identity.as_str()));
            args.path("--mac-signing-keychain", signing.keychain.as_deref())?;
            args.opt("--mac-package-signing-prefix", Some(signing.prefix.as_str()));
        }
    }

    Ok(args.into_vec())
}

/// Resolves the jpackage executable: explicit path, then `JAVA_HOME/bin`,
/// then a PATH lookup.
pub fn resolve_jpackage(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::Configuration(format!(
            "jpackage not found at {}",
            path.display()
        )));
    }

    if let Ok(java_home) = std::env::var("JAVA_HOME") {
        let candidate = Path::new(&java_home).join("bin").join(JPACKAGE_BIN);
        if candidate.is_file() {
            log::debug!("Found jpackage in JAVA_HOME: {}", candidate.display());
            return Ok(candidate);
        }
    }

    which::which("jpackage").map_err(|_| {
        Error::Configuration(
            "jpackage not found; install a JDK 14+ or pass an explicit path".into(),
        )
    })
}

const JPACKAGE_BIN: &str = if cfg!(windows) {
    "jpackage.exe"
} else {
    "jpackage"
};

fn main_jar_name(spec: &PackageSpec) -> Result<&str> {
    spec.main_jar
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::Configuration(format!(
                "invalid launcher jar path: {}",
                spec.main_jar.display()
            ))
        })
}

/// Accumulates jpackage arguments. Unset options emit nothing; boolean
/// options are bare flags emitted only when true.
#[derive(Default)]
struct Args(Vec<String>);

impl Args {
    fn opt(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.0.push(name.to_string());
            self.0.push(value.to_string());
        }
    }

    fn flag(&mut self, name: &str, value: Option<bool>) {
        if value == Some(true) {
            self.0.push(name.to_string());
        }
    }

    fn path(&mut self, name: &str, value: Option<&Path>) -> Result<()> {
        if let Some(value) = value {
            let value = value.to_str().ok_or_else(|| {
                Error::Configuration(format!(
                    "{name} path is not valid UTF-8: {}",
                    value.display()
                ))
            })?;
            self.0.push(name.to_string());
            self.0.push(value.to_string());
        }
        Ok(())
    }

    fn into_vec(self) -> Vec<String> {
        self.0
    }
}
