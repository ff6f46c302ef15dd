//! The `notarize` commands: upload and status.
//!
//! Upload and status are deliberately separate invocations bridged only by
//! the request-id file, so the status check can run hours later from a
//! fresh process.

use crate::cli::{NotarizeStatusArgs, NotarizeUploadArgs};
use crate::error::{CliError, Result};
use crate::packager::Error;
use crate::packager::exec::ExecContext;
use crate::packager::notarize::{
    NotarizationAuth, check_notarization_status, upload_for_notarization,
};
use crate::packager::settings::{PackageSpec, Platform};
use std::path::{Path, PathBuf};

const APPLE_ID_VAR: &str = "DISTPACK_APPLE_ID";
const PASSWORD_VAR: &str = "DISTPACK_APPLE_PASSWORD";

pub async fn upload(args: NotarizeUploadArgs, verbose: bool) -> Result<i32> {
    let spec = PackageSpec::load(&args.spec).await?;
    let os = Platform::current()?;
    if os != Platform::MacOs {
        return Err(Error::Configuration("notarization is only available on macOS".into()).into());
    }
    let auth = auth_from_env()?;

    // Resolve the bundle id the same way the packaging run does.
    let bundle_id = match spec.macos.validated_signing(os, &spec.package)? {
        Some(signing) => signing.bundle_id,
        None => spec.macos.bundle_id.clone().ok_or_else(|| {
            Error::Configuration("a bundle identifier is required for notarization".into())
        })?,
    };

    let ctx = ExecContext::new(args.work_dir.join("logs"), verbose);
    let request_file = request_id_file(&args.work_dir, args.request_file);
    upload_for_notarization(
        &ctx,
        spec.target_format,
        &args.dest,
        &bundle_id,
        &auth,
        &request_file,
    )
    .await?;

    Ok(0)
}

pub async fn status(args: NotarizeStatusArgs, verbose: bool) -> Result<i32> {
    let auth = auth_from_env()?;
    let ctx = ExecContext::new(args.work_dir.join("logs"), verbose);
    let request_file = request_id_file(&args.work_dir, args.request_file);

    let output = check_notarization_status(&ctx, &request_file, &auth).await?;
    println!("{output}");

    Ok(0)
}

fn request_id_file(work_dir: &Path, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| work_dir.join("notarization").join("request-id.txt"))
}

fn auth_from_env() -> Result<NotarizationAuth> {
    let apple_id = std::env::var(APPLE_ID_VAR).map_err(|_| CliError::MissingArgument {
        argument: APPLE_ID_VAR.to_string(),
    })?;
    let password = std::env::var(PASSWORD_VAR).map_err(|_| CliError::MissingArgument {
        argument: PASSWORD_VAR.to_string(),
    })?;
    Ok(NotarizationAuth { apple_id, password })
}
