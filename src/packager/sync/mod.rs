//! Staging-directory synchronization.
//!
//! Each run selects one [`FileProcessor`] and reconciles the declared
//! inputs into the staging directory, either incrementally from a computed
//! [`SyncPlan`] or by rebuilding the directory from scratch.

mod processor;
pub mod tracking;

pub use processor::{FileProcessor, MacSignProcessor};
pub use tracking::TrackedState;

use crate::packager::error::{Error, Result};
use crate::packager::exec::ExecContext;
use crate::packager::settings::{PackageSpec, Platform};
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// Per-file change relative to the previously tracked state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

#[derive(Clone, Debug)]
pub struct FileChange {
    /// Source path for added/modified inputs; the bare file name for
    /// removed ones (their source no longer exists)
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// How the staging directory gets reconciled this run.
#[derive(Clone, Debug)]
pub enum SyncPlan {
    /// Delete and recreate the staging directory, copying every input
    Full { inputs: Vec<PathBuf> },
    /// Apply only the inputs that changed since the state was captured
    Incremental { changes: Vec<FileChange> },
}

impl SyncPlan {
    /// Computes the plan for `inputs` against a previously captured state.
    /// Without tracked state every run is a full one.
    pub async fn compute(tracked: Option<&TrackedState>, inputs: &[PathBuf]) -> Result<SyncPlan> {
        let Some(tracked) = tracked else {
            return Ok(SyncPlan::Full {
                inputs: inputs.to_vec(),
            });
        };

        let current = TrackedState::capture(inputs).await?;
        let mut changes = Vec::new();
        for input in inputs {
            let name = input_name(input)?;
            match (tracked.digest(&name), current.digest(&name)) {
                (None, _) => changes.push(FileChange {
                    path: input.clone(),
                    kind: ChangeKind::Added,
                }),
                (Some(previous), Some(digest)) if previous != digest => {
                    changes.push(FileChange {
                        path: input.clone(),
                        kind: ChangeKind::Modified,
                    });
                }
                _ => log::debug!("Unchanged: {}", input.display()),
            }
        }
        for name in tracked.names() {
            if current.digest(name).is_none() {
                changes.push(FileChange {
                    path: PathBuf::from(name),
                    kind: ChangeKind::Removed,
                });
            }
        }
        Ok(SyncPlan::Incremental { changes })
    }
}

/// Selects the processor for this run.
///
/// macOS with signing enabled gets a [`MacSignProcessor`] bound to a
/// freshly cleared scratch directory; everything else copies files
/// verbatim. The returned processor stays fixed for the whole run.
pub async fn prepare_processor(
    spec: &PackageSpec,
    os: Platform,
    scratch_dir: &Path,
) -> Result<FileProcessor> {
    match spec.macos.validated_signing(os, &spec.package)? {
        Some(signing) => {
            fs::create_dir_all(scratch_dir, true).await?;
            Ok(FileProcessor::MacSign(MacSignProcessor::new(
                scratch_dir.to_path_buf(),
                signing,
            )))
        }
        None => Ok(FileProcessor::Plain),
    }
}

/// Reconciles the staging directory according to `plan`.
///
/// Incremental runs delete the targets of removed inputs and push
/// added/modified inputs through the processor. Full runs rebuild the
/// directory and copy everything; a basename clash is reported but not
/// fatal, the last writer wins.
pub async fn sync_working_dir(
    ctx: &ExecContext,
    plan: &SyncPlan,
    staging_dir: &Path,
    processor: &FileProcessor,
) -> Result<()> {
    match plan {
        SyncPlan::Incremental { changes } => {
            log::debug!("Updating staging dir incrementally: {}", staging_dir.display());
            for change in changes {
                let target = staging_dir.join(input_name(&change.path)?);
                match change.kind {
                    ChangeKind::Removed => {
                        fs::remove_file(&target).await?;
                        log::debug!("Deleted: {}", target.display());
                    }
                    ChangeKind::Added | ChangeKind::Modified => {
                        processor.copy(ctx, &change.path, &target).await?;
                        log::debug!("Updated: {}", target.display());
                    }
                }
            }
        }
        SyncPlan::Full { inputs } => {
            log::debug!(
                "Updating staging dir non-incrementally: {}",
                staging_dir.display()
            );
            fs::create_dir_all(staging_dir, true).await?;
            for source in inputs {
                let target = staging_dir.join(input_name(source)?);
                if target.exists() {
                    log::warn!("File already exists: {}", target.display());
                }
                processor.copy(ctx, source, &target).await?;
            }
        }
    }
    Ok(())
}

pub(crate) fn input_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Configuration(format!("input has no usable file name: {}", path.display()))
        })
}
