//! Locating the produced distributable.

use crate::packager::error::{ErrorExt, Result};
use crate::packager::settings::TargetFormat;
use std::path::{Path, PathBuf};

/// Finds the single artifact jpackage produced for `format` under `dir`.
///
/// App images are directories; every other format is a single file carrying
/// the format's extension. Zero or multiple candidates are an error.
pub fn find_artifact(dir: &Path, format: TargetFormat) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).fs_context("reading destination directory", dir)? {
        let entry = entry.fs_context("reading destination directory", dir)?;
        let path = entry.path();
        let matches = if format == TargetFormat::AppImage {
            path.is_dir()
        } else {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(format.extension()))
        };
        if matches {
            candidates.push(path);
        }
    }

    if candidates.len() > 1 {
        crate::bail!(
            "multiple {format} artifacts found in {}: {candidates:?}",
            dir.display()
        );
    }
    match candidates.pop() {
        Some(path) => Ok(path),
        None => crate::bail!("no {format} artifact found in {}", dir.display()),
    }
}
