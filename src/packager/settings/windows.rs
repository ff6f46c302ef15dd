//! Windows installer settings.

use serde::Deserialize;
use std::path::PathBuf;

/// Settings forwarded to jpackage when building an .exe or .msi installer.
///
/// Boolean fields are bare flags: emitted when true, omitted otherwise.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WindowsSettings {
    /// Launcher keeps a console window attached (`--win-console`).
    /// Applies to the launcher, so only emitted in build-from-scratch mode.
    #[serde(default)]
    pub console: Option<bool>,

    /// Installer lets the user pick the install directory (`--win-dir-chooser`)
    #[serde(default)]
    pub dir_chooser: Option<bool>,

    /// Per-user install instead of system-wide (`--win-per-user-install`)
    #[serde(default)]
    pub per_user_install: Option<bool>,

    /// Creates a desktop shortcut (`--win-shortcut`)
    #[serde(default)]
    pub shortcut: Option<bool>,

    /// Adds a start-menu entry (`--win-menu`)
    #[serde(default)]
    pub menu: Option<bool>,

    /// Start-menu group (`--win-menu-group`)
    #[serde(default)]
    pub menu_group: Option<String>,

    /// Stable upgrade GUID so newer installers replace older versions
    /// (`--win-upgrade-uuid`)
    #[serde(default)]
    pub upgrade_uuid: Option<String>,

    /// WiX toolset location, prepended to PATH for the jpackage child
    /// process. Required for .msi output when WiX is not already on PATH.
    #[serde(default)]
    pub wix_toolset_dir: Option<PathBuf>,
}
