//! External tool invocation with captured logs.
//!
//! Each invocation captures stdout and stderr into two distinct log files
//! under the context's log directory. Successful invocations delete their
//! logs; failed ones retain them and report their paths. Invocations block
//! until the tool exits; no timeout is enforced.

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::utils::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

/// One external tool call: tool, arguments and execution settings.
pub struct Invocation<'a> {
    tool: &'a Path,
    args: Vec<String>,
    env: Vec<(String, String)>,
    working_dir: Option<PathBuf>,
    check_exit_code: bool,
}

impl<'a> Invocation<'a> {
    pub fn new(tool: &'a Path, args: Vec<String>) -> Self {
        Self {
            tool,
            args,
            env: Vec::new(),
            working_dir: None,
            check_exit_code: true,
        }
    }

    /// Adds an environment override for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Disables exit-code checking; the caller inspects the status itself.
    pub fn check_exit_code(mut self, check: bool) -> Self {
        self.check_exit_code = check;
        self
    }
}

/// Exit information returned for every invocation.
#[derive(Clone, Copy, Debug)]
pub struct ExecStatus {
    pub exit_code: i32,
}

/// Per-run execution context: log directory, verbosity and log sequencing.
///
/// Passed explicitly into everything that runs external tools so that
/// repeated or concurrent runs stay composable. The counter disambiguates
/// log files of rapid consecutive invocations within one timestamp.
pub struct ExecContext {
    logs_dir: PathBuf,
    verbose: bool,
    counter: AtomicU64,
}

impl ExecContext {
    pub fn new(logs_dir: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            verbose,
            counter: AtomicU64::new(0),
        }
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Runs the tool, discarding its output on success.
    pub async fn run(&self, invocation: Invocation<'_>) -> Result<ExecStatus> {
        self.run_with_stdout(invocation, |_| Ok(())).await
    }

    /// Runs the tool. On exit code 0, `process_stdout` receives the captured
    /// stdout log before both logs are deleted; an error from it aborts the
    /// call with the logs retained. A non-zero exit with checking enabled
    /// fails with the full command line, working directory, exit code and
    /// both retained log paths.
    pub async fn run_with_stdout<F>(
        &self,
        invocation: Invocation<'_>,
        process_stdout: F,
    ) -> Result<ExecStatus>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        tokio::fs::create_dir_all(&self.logs_dir)
            .await
            .fs_context("creating log directory", &self.logs_dir)?;

        let tool_name = invocation
            .tool
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tool".to_string());
        let stamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        let base = format!("{tool_name}-{stamp}-{seq}");
        let stdout_log = self.logs_dir.join(format!("{base}-out.txt"));
        let stderr_log = self.logs_dir.join(format!("{base}-err.txt"));

        // Created in verbose mode too, so callbacks always have a path.
        let out_file =
            std::fs::File::create(&stdout_log).fs_context("creating stdout log", &stdout_log)?;
        let err_file =
            std::fs::File::create(&stderr_log).fs_context("creating stderr log", &stderr_log)?;

        let mut command = tokio::process::Command::new(invocation.tool);
        command.args(&invocation.args);
        for (key, value) in &invocation.env {
            command.env(key, value);
        }
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }
        if self.verbose {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            command
                .stdout(Stdio::from(out_file))
                .stderr(Stdio::from(err_file));
        }

        log::debug!(
            "Running {} {:?}",
            invocation.tool.display(),
            invocation.args
        );
        let status = command.status().await.map_err(|source| Error::Filesystem {
            context: "spawning external tool".to_string(),
            path: invocation.tool.display().to_string(),
            source,
        })?;
        let exit_code = status.code().unwrap_or(-1);

        if exit_code == 0 {
            process_stdout(&stdout_log)?;
            fs::remove_file(&stdout_log).await?;
            fs::remove_file(&stderr_log).await?;
        } else if invocation.check_exit_code {
            let command_line = std::iter::once(invocation.tool.display().to_string())
                .chain(invocation.args.iter().cloned())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::ToolFailure {
                command: command_line,
                working_dir: invocation
                    .working_dir
                    .as_deref()
                    .map(|d| d.display().to_string())
                    .unwrap_or_default(),
                exit_code,
                stdout_log: stdout_log.display().to_string(),
                stderr_log: stderr_log.display().to_string(),
            });
        }

        Ok(ExecStatus { exit_code })
    }
}
