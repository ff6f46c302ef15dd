//! Linux installer settings.

use serde::Deserialize;

/// Settings forwarded to jpackage when building a .deb or .rpm installer.
///
/// Every field is optional; unset fields emit no argument.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LinuxSettings {
    /// Creates a desktop shortcut (`--linux-shortcut`)
    #[serde(default)]
    pub shortcut: Option<bool>,

    /// Package name when it differs from the application name
    /// (`--linux-package-name`)
    #[serde(default)]
    pub package_name: Option<String>,

    /// Release value for the package file name (`--linux-app-release`)
    #[serde(default)]
    pub app_release: Option<String>,

    /// Menu category, e.g. "Development" (`--linux-app-category`)
    #[serde(default)]
    pub app_category: Option<String>,

    /// Maintainer email for .deb metadata (`--linux-deb-maintainer`)
    #[serde(default)]
    pub deb_maintainer: Option<String>,

    /// Start-menu group (`--linux-menu-group`)
    #[serde(default)]
    pub menu_group: Option<String>,

    /// License type for .rpm metadata (`--linux-rpm-license-type`)
    #[serde(default)]
    pub rpm_license_type: Option<String>,
}
