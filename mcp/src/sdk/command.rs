//! Running external SDK binaries
//!
//! Every bridge and SDK call goes through [`CommandRunner`] so the tool layer can be
//! exercised against scripted output. [`SystemCommandRunner`] is the real
//! implementation: captured output, optional stdin feed, per-call timeout, and
//! cancellation that kills the child.

use std::fs::File;
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use error_stack::{Report, ResultExt};
use itertools::Itertools;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::config::{AndroidTool, ToolPaths};
use crate::constants::SDK_PATH_HINT;
use crate::error::{Error, Result};

/// One external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Which binary to run
    pub tool:    AndroidTool,
    /// Arguments, passed without shell interpretation
    pub args:    Vec<String>,
    /// Text written to the child's stdin; stdin is closed when `None`
    pub stdin:   Option<String>,
    /// Kill the child after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// Build a spec with no stdin and no timeout
    pub fn new<I, S>(tool: AndroidTool, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tool,
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
            timeout: None,
        }
    }

    /// Feed `input` to the child's stdin
    #[must_use]
    pub fn with_stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Bound the call by `timeout`
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Human readable command line, used in logs and error text
    pub fn command_line(&self) -> String {
        std::iter::once(self.tool.as_ref())
            .chain(self.args.iter().map(String::as_str))
            .join(" ")
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub status: Option<i32>,
    /// Captured stdout, lossily decoded
    pub stdout: String,
    /// Captured stderr, lossily decoded
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// True when the process exited with code 0
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }

    /// Best description of a failure: stderr when present, otherwise stdout, otherwise the
    /// exit status
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        self.status.map_or_else(
            || "process terminated by signal".to_string(),
            |code| format!("exit status {code}"),
        )
    }

    /// Stdout followed by stderr, for commands that report on either stream
    pub fn combined(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            (out, "") => out.to_string(),
            ("", err) => err.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }
}

/// A process started without waiting for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedProcess {
    /// OS process id
    pub pid:      u32,
    /// File receiving the process's stdout and stderr
    pub log_path: PathBuf,
}

/// Executes external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and capture output. A non-zero exit is not an error here; only
    /// spawn failures, timeouts and cancellation are.
    async fn run(&self, spec: &CommandSpec, cancel: &CancellationToken) -> Result<CommandOutput>;

    /// Start a long running process with output redirected to `log_path` and return
    /// immediately
    fn spawn_detached(&self, spec: &CommandSpec, log_path: &Path) -> Result<DetachedProcess>;
}

/// [`CommandRunner`] backed by real OS processes
pub struct SystemCommandRunner {
    tool_paths: ToolPaths,
}

impl SystemCommandRunner {
    /// Create a runner that resolves binaries through `tool_paths`
    pub const fn new(tool_paths: ToolPaths) -> Self {
        Self { tool_paths }
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, spec: &CommandSpec, cancel: &CancellationToken) -> Result<CommandOutput> {
        let program = self.tool_paths.get(spec.tool);
        let command_line = spec.command_line();
        tracing::debug!("Running: {command_line}");

        let mut command = Command::new(program);
        command
            .args(&spec.args)
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|e| Report::new(Error::process_failed("spawn", &command_line, e)))
            .attach(format!("Program: {}", program.display()))?;

        if let Some(input) = spec.stdin.clone()
            && let Some(mut stdin) = child.stdin.take()
        {
            // a child that stops reading must not block the caller
            tokio::spawn(async move {
                if let Err(e) = stdin.write_all(input.as_bytes()).await {
                    tracing::debug!("stdin closed early: {e}");
                }
            });
        }

        let wait = child.wait_with_output();
        let output = tokio::select! {
            () = cancel.cancelled() => {
                tracing::warn!("Cancelled: {command_line}");
                return Err(Report::new(Error::failed_to(
                    format!("run '{command_line}'"),
                    "the request was cancelled",
                )));
            }
            result = wait_with_timeout(wait, spec.timeout) => match result {
                Some(result) => result
                    .map_err(|e| Report::new(Error::process_failed("wait for", &command_line, e)))?,
                None => {
                    tracing::warn!("Timed out: {command_line}");
                    return Err(Report::new(Error::failed_to(
                        format!("run '{command_line}'"),
                        format!(
                            "timed out after {}s",
                            spec.timeout.map_or(0, |timeout| timeout.as_secs())
                        ),
                    )));
                }
            },
        };

        let output = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !output.success() {
            tracing::warn!(
                "{command_line} exited with {:?}: {}",
                output.status,
                output.failure_detail()
            );
        }
        Ok(output)
    }

    fn spawn_detached(&self, spec: &CommandSpec, log_path: &Path) -> Result<DetachedProcess> {
        let program = self.tool_paths.get(spec.tool);
        let command_line = spec.command_line();

        let log_file = File::create(log_path)
            .map_err(|e| Report::new(Error::io_failed("create log file", log_path, e)))?;
        let log_file_for_stderr = log_file
            .try_clone()
            .map_err(|e| Report::new(Error::io_failed("clone log file", log_path, e)))?;

        let mut command = std::process::Command::new(program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(log_file_for_stderr));

        // own process group so the emulator survives this server
        #[cfg(unix)]
        command.process_group(0);

        tracing::debug!("Spawning detached: {command_line}");
        let mut child = command
            .spawn()
            .map_err(|e| Report::new(Error::process_failed("start", &command_line, e)))
            .attach(format!("Program: {}", program.display()))?;
        let pid = child.id();

        // reap the child when it exits so it does not linger as a zombie
        std::thread::spawn(move || match child.wait() {
            Ok(status) => tracing::debug!("Detached process {pid} exited with status: {status:?}"),
            Err(e) => tracing::warn!("Failed to wait for detached process {pid}: {e}"),
        });

        Ok(DetachedProcess {
            pid,
            log_path: log_path.to_path_buf(),
        })
    }
}

/// `None` when the timeout elapsed first
async fn wait_with_timeout<F, T>(wait: F, timeout: Option<Duration>) -> Option<T>
where
    F: Future<Output = T>,
{
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, wait).await.ok(),
        None => Some(wait.await),
    }
}

/// Remediation text for a failed external call
pub const fn failure_hint(output: &CommandOutput) -> Option<&'static str> {
    // 127 is the shell's "command not found"
    if matches!(output.status, Some(127)) {
        Some(SDK_PATH_HINT)
    } else {
        None
    }
}
