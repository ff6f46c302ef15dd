//! macOS settings and signing validation.

use super::PackageSettings;
use super::format::Platform;
use crate::packager::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// macOS-specific packaging settings.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MacOsSettings {
    /// Name shown in the menu bar (`--mac-package-name`)
    #[serde(default)]
    pub package_name: Option<String>,

    /// Bundle identifier (`--mac-package-identifier`). Also used as the
    /// primary bundle id for notarization uploads.
    #[serde(default)]
    pub bundle_id: Option<String>,

    #[serde(default)]
    pub signing: MacSigningSettings,
}

/// Code-signing settings as declared by the caller.
///
/// Only meaningful on macOS with `sign` set; every other platform ignores
/// them entirely.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MacSigningSettings {
    /// Signing is strictly opt-in
    #[serde(default)]
    pub sign: bool,

    /// Signing identity, e.g. "Developer ID Application: Jane Doe (TEAMID)"
    #[serde(default)]
    pub identity: Option<String>,

    /// Keychain holding the identity. Unset means the default search list.
    #[serde(default)]
    pub keychain: Option<PathBuf>,

    /// Bundle-identifier prefix passed to jpackage and codesign.
    /// Defaults to the resolved bundle id followed by a dot.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Signing settings that passed validation and carry resolved defaults.
#[derive(Clone, Debug)]
pub struct ValidatedSigningSettings {
    pub identity: String,
    pub keychain: Option<PathBuf>,
    pub prefix: String,
    pub bundle_id: String,
}

impl MacOsSettings {
    /// Resolves signing settings for this run.
    ///
    /// Returns `None` unless the platform is macOS and signing was
    /// explicitly enabled. Incomplete settings fail here, before any
    /// argument is emitted or any external tool runs.
    pub fn validated_signing(
        &self,
        os: Platform,
        package: &PackageSettings,
    ) -> Result<Option<ValidatedSigningSettings>> {
        if os != Platform::MacOs || !self.signing.sign {
            return Ok(None);
        }

        let identity = match self.signing.identity.as_deref().map(str::trim) {
            Some(identity) if !identity.is_empty() => identity.to_string(),
            _ => {
                return Err(Error::Configuration(
                    "macOS signing is enabled, but no signing identity is configured".into(),
                ));
            }
        };

        let bundle_id = match &self.bundle_id {
            Some(id) => id.clone(),
            None => default_bundle_id(package),
        };
        if bundle_id.is_empty()
            || !bundle_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(Error::Configuration(format!(
                "invalid bundle identifier '{bundle_id}': \
                 only alphanumeric characters, '.' and '-' are allowed"
            )));
        }

        let prefix = self
            .signing
            .prefix
            .clone()
            .unwrap_or_else(|| format!("{bundle_id}."));

        Ok(Some(ValidatedSigningSettings {
            identity,
            keychain: self.signing.keychain.clone(),
            prefix,
            bundle_id,
        }))
    }
}

/// Derives a bundle identifier from package metadata when none is declared.
fn default_bundle_id(package: &PackageSettings) -> String {
    let mut segments = vec!["com".to_string()];
    if let Some(vendor) = &package.vendor {
        let vendor = sanitize_segment(vendor);
        if !vendor.is_empty() {
            segments.push(vendor);
        }
    }
    let name = sanitize_segment(&package.name);
    segments.push(if name.is_empty() {
        "application".to_string()
    } else {
        name
    });
    segments.join(".")
}

fn sanitize_segment(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
