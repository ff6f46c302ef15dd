//! Native distributable packaging for JVM applications.
//!
//! Wraps the JDK's jpackage tool: synchronizes input artifacts into a
//! staging directory (optionally codesigning each file on macOS), builds
//! the jpackage command line, runs it, and drives the two-stage macOS
//! notarization workflow.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, DistpackError, Result};
