//! Notarization upload and status lookup.
//!
//! The two entry points are independent and may run in separate processes;
//! the persisted request-id file is the only state bridging them. Neither
//! polls: one invocation performs one upload or one status query.

use crate::packager::artifact::find_artifact;
use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::exec::{ExecContext, Invocation};
use crate::packager::settings::TargetFormat;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// The only machine-readable success signal altool emits. Brittle to tool
/// output changes; kept in one place for that reason.
static REQUEST_UUID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RequestUUID = ([A-Za-z0-9\-]+)").expect("valid literal regex"));

/// Apple account credentials for altool.
#[derive(Clone, Debug)]
pub struct NotarizationAuth {
    pub apple_id: String,
    pub password: String,
}

/// Uploads the produced artifact for notarization and persists the scraped
/// request id to `request_id_file`, creating parent directories as needed.
///
/// App images are rejected before any external call. Returns the request id.
pub async fn upload_for_notarization(
    ctx: &ExecContext,
    format: TargetFormat,
    input_dir: &Path,
    bundle_id: &str,
    auth: &NotarizationAuth,
    request_id_file: &Path,
) -> Result<String> {
    if format == TargetFormat::AppImage {
        return Err(Error::Configuration(
            "app-image cannot be notarized".into(),
        ));
    }

    let artifact = find_artifact(input_dir, format)?;
    log::info!(
        "Uploading '{}' for notarization (bundle id: '{bundle_id}')",
        artifact.display()
    );

    let args = vec![
        "altool".to_string(),
        "--notarize-app".to_string(),
        "--primary-bundle-id".to_string(),
        bundle_id.to_string(),
        "--username".to_string(),
        auth.apple_id.clone(),
        "--password".to_string(),
        auth.password.clone(),
        "--file".to_string(),
        artifact.display().to_string(),
    ];

    let mut request_id = None;
    ctx.run_with_stdout(Invocation::new(Path::new("xcrun"), args), |stdout_log| {
        request_id = Some(persist_request_id(stdout_log, request_id_file)?);
        Ok(())
    })
    .await?;

    let request_id = request_id.ok_or_else(|| {
        Error::GenericError("notarization upload finished without a request id".into())
    })?;
    log::info!("Request UUID: {request_id}");
    log::info!("Request UUID saved to {}", request_id_file.display());
    Ok(request_id)
}

/// Scrapes the request id from a captured stdout log and writes it verbatim
/// to `request_id_file`.
pub fn persist_request_id(stdout_log: &Path, request_id_file: &Path) -> Result<String> {
    let output =
        std::fs::read_to_string(stdout_log).fs_context("reading upload output", stdout_log)?;
    let request_id = parse_request_id(&output).ok_or_else(|| Error::OutputParse {
        message: "could not determine RequestUUID from upload output".to_string(),
        log: stdout_log.display().to_string(),
    })?;

    if let Some(parent) = request_id_file.parent() {
        std::fs::create_dir_all(parent).fs_context("creating request id directory", parent)?;
    }
    std::fs::write(request_id_file, &request_id)
        .fs_context("writing request id", request_id_file)?;

    Ok(request_id)
}

/// Extracts the request identifier from altool upload output.
pub fn parse_request_id(output: &str) -> Option<String> {
    REQUEST_UUID
        .captures(output)
        .map(|captures| captures[1].to_string())
}

/// Queries notarization status once and returns altool's raw output
/// unparsed. The request-id file must exist from an earlier upload.
pub async fn check_notarization_status(
    ctx: &ExecContext,
    request_id_file: &Path,
    auth: &NotarizationAuth,
) -> Result<String> {
    let request_id = tokio::fs::read_to_string(request_id_file)
        .await
        .fs_context("reading notarization request id", request_id_file)?;

    let args = vec![
        "altool".to_string(),
        "--notarization-info".to_string(),
        request_id,
        "--username".to_string(),
        auth.apple_id.clone(),
        "--password".to_string(),
        auth.password.clone(),
    ];

    let mut output = String::new();
    ctx.run_with_stdout(Invocation::new(Path::new("xcrun"), args), |stdout_log| {
        output = std::fs::read_to_string(stdout_log)
            .fs_context("reading status output", stdout_log)?;
        Ok(())
    })
    .await?;

    Ok(output)
}
