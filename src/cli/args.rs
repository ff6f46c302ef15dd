//! Command line argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Native distributable packager for JVM applications
#[derive(Parser, Debug)]
#[command(
    name = "distpack",
    version,
    about = "Packages JVM application artifacts into native distributables via jpackage",
    long_about = "Builds a self-contained app image or an OS installer (.deb, .rpm, .dmg, .pkg, .exe, .msi) from JVM application artifacts.

Usage:
  distpack package --spec app.json --dest dist
  distpack notarize upload --spec app.json --dest dist
  distpack notarize status

Notarization credentials are read from DISTPACK_APPLE_ID and DISTPACK_APPLE_PASSWORD."
)]
pub struct Cli {
    /// Stream external tool output live instead of capturing it to log files
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a native app image or installer from a package spec
    Package(PackageArgs),

    /// macOS notarization workflow for a produced artifact
    #[command(subcommand)]
    Notarize(NotarizeCommand),
}

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package spec file (JSON)
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,

    /// Destination directory for the produced distributable
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub dest: PathBuf,

    /// Working directory holding logs, staging and signing scratch space
    #[arg(long, value_name = "DIR", default_value = "build/distpack")]
    pub work_dir: PathBuf,

    /// Synchronize the staging directory incrementally from tracked state
    #[arg(long)]
    pub incremental: bool,

    /// Explicit path to the jpackage executable
    #[arg(long, value_name = "PATH")]
    pub jpackage: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum NotarizeCommand {
    /// Upload the produced artifact and persist the request id
    Upload(NotarizeUploadArgs),

    /// Query the status of a previous upload once
    Status(NotarizeStatusArgs),
}

#[derive(Args, Debug)]
pub struct NotarizeUploadArgs {
    /// Package spec file (JSON)
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,

    /// Directory containing the produced distributable
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub dest: PathBuf,

    /// Working directory holding logs and the request-id file
    #[arg(long, value_name = "DIR", default_value = "build/distpack")]
    pub work_dir: PathBuf,

    /// File the request id is written to
    /// (default: <work-dir>/notarization/request-id.txt)
    #[arg(long, value_name = "FILE")]
    pub request_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NotarizeStatusArgs {
    /// Working directory holding logs and the request-id file
    #[arg(long, value_name = "DIR", default_value = "build/distpack")]
    pub work_dir: PathBuf,

    /// File the request id is read from
    /// (default: <work-dir>/notarization/request-id.txt)
    #[arg(long, value_name = "FILE")]
    pub request_file: Option<PathBuf>,
}
