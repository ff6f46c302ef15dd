//! Per-file processors applied during staging synchronization.

use crate::packager::error::{Error, Result};
use crate::packager::exec::{ExecContext, Invocation};
use crate::packager::settings::ValidatedSigningSettings;
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};

/// File transform chosen once per synchronization run and applied to every
/// input uniformly.
pub enum FileProcessor {
    /// Byte-for-byte copy
    Plain,
    /// Copy through the signing scratch directory, codesigning on the way
    MacSign(MacSignProcessor),
}

impl FileProcessor {
    pub async fn copy(&self, ctx: &ExecContext, source: &Path, target: &Path) -> Result<()> {
        match self {
            FileProcessor::Plain => fs::copy_file(source, target).await,
            FileProcessor::MacSign(processor) => processor.copy(ctx, source, target).await,
        }
    }
}

/// Signs each file with `codesign` before it reaches the staging directory.
///
/// The scratch directory is cleared once per run, not once per file; files
/// are processed strictly one at a time. A failed signature aborts the run;
/// there is no fallback to an unsigned copy.
pub struct MacSignProcessor {
    scratch_dir: PathBuf,
    signing: ValidatedSigningSettings,
}

impl MacSignProcessor {
    pub fn new(scratch_dir: PathBuf, signing: ValidatedSigningSettings) -> Self {
        Self {
            scratch_dir,
            signing,
        }
    }

    async fn copy(&self, ctx: &ExecContext, source: &Path, target: &Path) -> Result<()> {
        let name = source.file_name().ok_or_else(|| {
            Error::Configuration(format!("input has no file name: {}", source.display()))
        })?;
        let staged = self.scratch_dir.join(name);
        fs::copy_file(source, &staged).await?;

        let mut args = vec![
            "--force".to_string(),
            "--timestamp".to_string(),
            "--options".to_string(),
            "runtime".to_string(),
            "--prefix".to_string(),
            self.signing.prefix.clone(),
            "--sign".to_string(),
            self.signing.identity.clone(),
        ];
        if let Some(keychain) = &self.signing.keychain {
            args.push("--keychain".to_string());
            args.push(keychain.display().to_string());
        }
        args.push(staged.display().to_string());

        ctx.run(Invocation::new(Path::new("codesign"), args)).await?;

        fs::copy_file(&staged, target).await
    }
}
