//! distpack - native distributable packager for JVM applications.
//!
//! This binary builds platform-specific distributables (app images, .deb,
//! .rpm, .dmg, .pkg, .exe, .msi) from JVM application artifacts by driving
//! jpackage, and handles the macOS notarization workflow.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match distpack::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
