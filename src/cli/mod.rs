//! Command line interface for distpack.

mod args;
pub mod commands;

pub use args::{
    Cli, Command, NotarizeCommand, NotarizeStatusArgs, NotarizeUploadArgs, PackageArgs,
};

use crate::error::Result;
use clap::Parser;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Package(args) => commands::package::run(args, cli.verbose).await,
        Command::Notarize(NotarizeCommand::Upload(args)) => {
            commands::notarize::upload(args, cli.verbose).await
        }
        Command::Notarize(NotarizeCommand::Status(args)) => {
            commands::notarize::status(args, cli.verbose).await
        }
    }
}
