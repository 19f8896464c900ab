// Runs the OpenSIPS control command as a child process.
//
// Arguments are passed as discrete argv entries, never through a shell. The child is
// spawned with kill_on_drop, so a timeout or a dropped probe future terminates it.

use crate::error::ProbeError;
use crate::models::QueryResult;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// A resolved, executable control binary plus the invocation deadline.
#[derive(Debug, Clone)]
pub struct ControlCommand {
    path: PathBuf,
    timeout: Duration,
}

impl ControlCommand {
    /// Path commands are checked as given, bare names are looked up on PATH.
    /// Fails with CommandNotFound before anything is spawned.
    pub fn resolve(command: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let path = which::which(command)
            .map_err(|_| ProbeError::CommandNotFound(PathBuf::from(command)))?;
        debug!(path = %path.display(), "resolved control command");
        Ok(Self { path, timeout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs the child to completion and captures its outcome whatever the exit code.
    #[instrument(skip(self), fields(repo = "ctl", path = %self.path.display()))]
    pub async fn invoke(&self, args: &[String]) -> Result<QueryResult, ProbeError> {
        let child = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                let ms = self.timeout.as_millis() as u64;
                warn!(timeout_ms = ms, "control command timed out");
                return Err(ProbeError::Timeout(ms));
            }
        };

        let result = QueryResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            exit_code = result.exit_code,
            stdout_bytes = result.stdout.len(),
            "control command finished"
        );
        Ok(result)
    }

    /// Like `invoke`, but a non-zero exit is ExternalCommandFailed.
    pub async fn execute(&self, args: &[String]) -> Result<QueryResult, ProbeError> {
        let result = self.invoke(args).await?;
        if !result.succeeded() {
            warn!(exit_code = result.exit_code, stderr = %result.stderr.trim(), "control command failed");
            return Err(ProbeError::ExternalCommandFailed {
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }
}

pub(crate) fn is_readable(path: &Path) -> bool {
    std::fs::File::open(path).is_ok()
}

/// Resolve `command` and run it once with `args`.
pub async fn execute(
    command: &str,
    args: &[String],
    timeout: Duration,
) -> Result<QueryResult, ProbeError> {
    ControlCommand::resolve(command, timeout)?.execute(args).await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    const SECOND: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn captures_stdout_and_stderr_separately() {
        let r = execute("/bin/sh", &sh("echo out; echo err >&2"), SECOND)
            .await
            .unwrap();
        assert_eq!(r.exit_code, 0);
        assert_eq!(r.stdout, "out\n");
        assert_eq!(r.stderr, "err\n");
    }

    #[tokio::test]
    async fn non_zero_exit_is_reported_with_stderr() {
        let err = execute("/bin/sh", &sh("echo 'connection refused' >&2; exit 1"), SECOND)
            .await
            .unwrap_err();
        match err {
            ProbeError::ExternalCommandFailed { exit_code, stderr } => {
                assert_eq!(exit_code, 1);
                assert_eq!(stderr, "connection refused");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn invoke_keeps_non_zero_outcome() {
        let cmd = ControlCommand::resolve("/bin/sh", SECOND).unwrap();
        let r = cmd.invoke(&sh("exit 7")).await.unwrap();
        assert_eq!(r.exit_code, 7);
        assert!(!r.succeeded());
    }

    #[tokio::test]
    async fn arguments_are_not_shell_interpreted() {
        let args = vec!["$(echo injected); echo nope".to_string()];
        let r = execute("/bin/echo", &args, SECOND).await.unwrap();
        assert_eq!(r.stdout, "$(echo injected); echo nope\n");
    }

    #[tokio::test]
    async fn missing_binary_fails_before_spawn() {
        let err = execute("/nonexistent/opensipsctl", &[], SECOND)
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::CommandNotFound(_)));
    }

    #[test]
    fn bare_names_resolve_on_path() {
        let cmd = ControlCommand::resolve("sh", SECOND).unwrap();
        assert!(cmd.path().is_absolute());
        assert!(is_readable(cmd.path()));
    }

    #[test]
    fn non_executable_file_does_not_resolve() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("opensipsctl");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        let err = ControlCommand::resolve(path.to_str().unwrap(), SECOND).unwrap_err();
        assert!(matches!(err, ProbeError::CommandNotFound(_)));
        assert!(matches!(
            ControlCommand::resolve("", SECOND),
            Err(ProbeError::CommandNotFound(_))
        ));
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let started = std::time::Instant::now();
        let err = execute("/bin/sh", &sh("exec sleep 10"), Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Timeout(200)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
