use async_trait::async_trait;
use std::process::ExitStatus;
use std::time::Duration;

/// Unique identifier for a process
pub type ProcessId = u32;

/// Result of a process termination operation
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationResult {
    /// Process exited after the graceful request
    Success,
    /// Process ignored the graceful request and was killed
    Forced,
    /// Process was not found (already exited)
    ProcessNotFound,
    /// Permission denied (insufficient privileges)
    AccessDenied,
    /// Operation failed with specific error message
    Failed(String),
}

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// stdout and stderr are piped back to the adapter
    Capture,
    /// stdout and stderr go to /dev/null; used for long-lived children nobody reads
    Discard,
}

/// Captured result of a process run to completion
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Error types for process operations
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to execute `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Trait representing a handle to a spawned process
#[async_trait]
pub trait ProcessHandle: Send + Sync {
    /// Get the process ID captured at spawn time
    fn get_pid(&self) -> Option<ProcessId>;

    /// Get the command that started this process
    fn get_command(&self) -> &str;

    /// Check if the process is still running (non-blocking, reaps an exited child)
    fn is_running(&mut self) -> bool;

    /// Wait for the process to exit
    async fn wait(&mut self) -> Result<ExitStatus, ProcessError>;
}

/// Platform process manager: spawning, bounded runs and termination.
///
/// Every child is expected to live in its own process group so that signals
/// sent on termination reach anything the external tool forks.
#[async_trait]
pub trait ProcessManager: Send + Sync {
    /// The type of process handle returned by this process manager
    type Handle: ProcessHandle;

    /// Create a new process manager instance
    fn new() -> Self
    where
        Self: Sized;

    /// Spawn a process and return immediately
    async fn spawn_process(
        &self,
        command: &str,
        args: &[String],
        output: OutputMode,
    ) -> Result<Self::Handle, ProcessError>;

    /// Run a process to completion, capturing its output.
    ///
    /// When `timeout` elapses the whole process group is killed and reaped
    /// before [`ProcessError::Timeout`] is returned.
    async fn run_captured(
        &self,
        command: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;

    /// Ask the process group to exit (SIGTERM on Unix)
    async fn terminate_gracefully(&self, handle: &mut Self::Handle) -> TerminationResult;

    /// Kill the process group and reap the child (SIGKILL on Unix)
    async fn force_kill(&self, handle: &mut Self::Handle) -> TerminationResult;

    /// Best-effort synchronous termination request, for use from `Drop`
    fn terminate_detached(&self, handle: &mut Self::Handle);

    /// Graceful termination, bounded by `grace`, escalating to a forced kill
    async fn shutdown(&self, handle: &mut Self::Handle, grace: Duration) -> TerminationResult {
        match self.terminate_gracefully(handle).await {
            TerminationResult::Success => {}
            TerminationResult::ProcessNotFound => return TerminationResult::ProcessNotFound,
            // Graceful request could not be delivered, go straight to kill
            _ => {
                return match self.force_kill(handle).await {
                    TerminationResult::Success => TerminationResult::Forced,
                    other => other,
                };
            }
        }

        match tokio::time::timeout(grace, handle.wait()).await {
            Ok(_) => TerminationResult::Success,
            Err(_) => match self.force_kill(handle).await {
                TerminationResult::Success | TerminationResult::ProcessNotFound => {
                    TerminationResult::Forced
                }
                other => other,
            },
        }
    }
}

/// Factory trait for creating platform-specific process managers
pub trait ProcessManagerFactory {
    /// The type of process manager this factory creates
    type Manager: ProcessManager;

    /// Create a process manager for the current platform
    fn create_process_manager() -> Self::Manager;

    /// Get the platform name for logging and debugging
    fn platform_name() -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_mentions_duration() {
        let error = ProcessError::Timeout(Duration::from_secs(600));
        assert_eq!(format!("{error}"), "Command timed out after 600s");

        let error = ProcessError::Timeout(Duration::from_millis(250));
        assert_eq!(format!("{error}"), "Command timed out after 250ms");
    }

    #[test]
    fn test_spawn_failure_displays_source() {
        let error = ProcessError::SpawnFailed {
            command: "donpapi".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            format!("{error}"),
            "failed to execute `donpapi`: No such file or directory"
        );
    }
}
