//! Error types for packaging operations.
//!
//! Every failure carries enough context (full command line, working
//! directory, retained log paths) to reproduce the external call by hand.

use std::path::Path;
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all packaging operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or incomplete settings, detected before any external call
    #[error("configuration error: {0}")]
    Configuration(String),

    /// External tool exited abnormally with exit-code checking enabled
    #[error(
        "external tool execution failed:\n\
         * Command: [{command}]\n\
         * Working dir: [{working_dir}]\n\
         * Exit code: {exit_code}\n\
         * Standard output log: {stdout_log}\n\
         * Error log: {stderr_log}"
    )]
    ToolFailure {
        /// Full command line, tool path first
        command: String,
        /// Working directory the tool ran in (empty when inherited)
        working_dir: String,
        /// Exit code, -1 when terminated by signal
        exit_code: i32,
        /// Retained stdout capture
        stdout_log: String,
        /// Retained stderr capture
        stderr_log: String,
    },

    /// Expected pattern missing from captured tool output
    #[error("{message} (raw output: {log})")]
    OutputParse {
        /// What was being looked for
        message: String,
        /// Path to the retained output capture
        log: String,
    },

    /// Filesystem operation failed, with the path it failed on
    #[error("{context}: {path}: {source}")]
    Filesystem {
        /// Operation being performed
        context: String,
        /// Path the operation targeted
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// IO errors without additional path context
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive reading errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Attaches path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Filesystem`] with the given
    /// operation description and path.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Filesystem {
            context: context.to_string(),
            path: path.display().to_string(),
            source,
        })
    }
}

/// Turns absent values into configuration errors.
pub trait Context<T> {
    fn context(self, message: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, message: &str) -> Result<T> {
        self.ok_or_else(|| Error::Configuration(message.to_string()))
    }
}

/// Returns early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}
