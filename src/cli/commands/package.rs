//! The `package` command: staging synchronization plus one jpackage run.

use crate::cli::PackageArgs;
use crate::error::Result;
use crate::packager::digest::artifact_sha256;
use crate::packager::error::ErrorExt;
use crate::packager::exec::{ExecContext, Invocation};
use crate::packager::jpackage::{jpackage_args, resolve_jpackage};
use crate::packager::settings::{PackageSpec, Platform};
use crate::packager::sync::{self, SyncPlan, TrackedState};
use crate::packager::{Error, artifact};

pub async fn run(args: PackageArgs, verbose: bool) -> Result<i32> {
    let spec = PackageSpec::load(&args.spec).await?;
    let os = Platform::current()?;

    if !spec.target_format.is_compatible_with(os) {
        return Err(Error::Configuration(format!(
            "target format {} cannot be built on this platform",
            spec.target_format
        ))
        .into());
    }

    let logs_dir = args.work_dir.join("logs");
    let staging_dir = args.work_dir.join("staging");
    let scratch_dir = args.work_dir.join("sign");
    let state_file = args.work_dir.join("state.json");
    let ctx = ExecContext::new(logs_dir, verbose);

    let inputs = spec.inputs();
    let processor = sync::prepare_processor(&spec, os, &scratch_dir).await?;
    let tracked = if args.incremental {
        TrackedState::load(&state_file).await?
    } else {
        None
    };
    let plan = SyncPlan::compute(tracked.as_ref(), &inputs).await?;
    sync::sync_working_dir(&ctx, &plan, &staging_dir, &processor).await?;

    let tool = resolve_jpackage(args.jpackage.as_deref())?;
    let tool_args = jpackage_args(&spec, os, &staging_dir, &args.dest, verbose)?;
    tokio::fs::create_dir_all(&args.dest)
        .await
        .fs_context("creating destination directory", &args.dest)?;

    let mut invocation = Invocation::new(&tool, tool_args);
    if os == Platform::Windows {
        if let Some(wix_dir) = &spec.windows.wix_toolset_dir {
            // jpackage finds WiX through PATH when producing .msi output.
            let path = std::env::var("PATH").unwrap_or_default();
            invocation = invocation.env("PATH", format!("{};{}", wix_dir.display(), path));
        }
    }
    ctx.run(invocation).await?;

    let produced = artifact::find_artifact(&args.dest, spec.target_format)?;
    log::info!("The distribution is written to {}", produced.display());

    let checksum = artifact_sha256(&produced).await?;
    log::info!("SHA-256: {checksum}");

    if args.incremental {
        TrackedState::capture(&inputs)
            .await?
            .store(&state_file)
            .await?;
    }

    Ok(0)
}
