//! Configuration types for packaging runs.
//!
//! A [`PackageSpec`] describes one run: target format, package metadata,
//! input artifacts and per-OS installer settings. Specs come from a JSON
//! file or from [`PackageSpecBuilder`].

mod builder;
mod core;
mod format;
mod linux;
mod macos;
mod windows;

pub use builder::PackageSpecBuilder;
pub use core::{PackageSettings, PackageSpec};
pub use format::{Platform, TargetFormat};
pub use linux::LinuxSettings;
pub use macos::{MacOsSettings, MacSigningSettings, ValidatedSigningSettings};
pub use windows::WindowsSettings;
