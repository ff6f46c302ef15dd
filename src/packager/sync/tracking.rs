//! Tracked input state for incremental runs.
//!
//! The pipeline never decides on its own when to track; the caller loads
//! state before a run, hands it to [`SyncPlan::compute`](super::SyncPlan),
//! and re-captures it after a successful run.

use crate::packager::digest;
use crate::packager::error::{Error, ErrorExt, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Input digests captured after a run, keyed by file name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrackedState {
    entries: BTreeMap<String, String>,
}

impl TrackedState {
    /// Digests every input: archive fingerprint for jars and zips, plain
    /// file hash for everything else.
    pub async fn capture(inputs: &[PathBuf]) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for input in inputs {
            let name = super::input_name(input)?;
            entries.insert(name, input_digest(input).await?);
        }
        Ok(Self { entries })
    }

    pub fn digest(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Loads previously captured state; `None` if no state exists yet.
    pub async fn load(path: &Path) -> Result<Option<Self>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).fs_context("reading tracked state", path),
        }
    }

    /// Persists the state as JSON, creating parent directories as needed.
    pub async fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating state directory", parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, text)
            .await
            .fs_context("writing tracked state", path)
    }
}

async fn input_digest(path: &Path) -> Result<String> {
    let is_archive = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jar") || e.eq_ignore_ascii_case("zip"));

    if is_archive {
        // Archive reading is blocking; keep it off the async workers.
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || digest::archive_fingerprint(&path))
            .await
            .map_err(|e| Error::GenericError(format!("fingerprint task panicked: {e}")))?
    } else {
        digest::file_sha256(path).await
    }
}
