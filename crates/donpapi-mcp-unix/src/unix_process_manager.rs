use async_trait::async_trait;
use donpapi_mcp_core::{
    OutputMode, ProcessError, ProcessHandle, ProcessId, ProcessManager, ProcessOutput,
    TerminationResult,
};
use std::process::ExitStatus;
use std::time::Duration;

#[cfg(unix)]
mod unix_impl {
    use super::*;
    use nix::sys::signal::{self, Signal};
    use nix::unistd::Pid as NixPid;
    use std::process::Stdio;
    use tokio::io::{AsyncRead, AsyncReadExt};
    use tokio::process::{Child, Command};
    use tracing::{debug, info, warn};

    /// Unix-specific process handle implementation
    pub struct UnixProcessHandle {
        child: Child,
        pid: Option<ProcessId>,
        command: String,
    }

    impl UnixProcessHandle {
        pub fn new(child: Child, command: String) -> Self {
            // `Child::id` returns None once reaped, the group id is needed after that
            let pid = child.id();
            Self {
                child,
                pid,
                command,
            }
        }
    }

    #[async_trait]
    impl ProcessHandle for UnixProcessHandle {
        fn get_pid(&self) -> Option<ProcessId> {
            self.pid
        }

        fn get_command(&self) -> &str {
            &self.command
        }

        fn is_running(&mut self) -> bool {
            // try_wait reaps a zombie, signal 0 would still report it alive
            match self.child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    info!(pid = ?self.pid, %status, "Unix process is no longer running");
                    false
                }
                Err(e) => {
                    warn!(pid = ?self.pid, "Failed to query process status: {}", e);
                    false
                }
            }
        }

        async fn wait(&mut self) -> Result<ExitStatus, ProcessError> {
            Ok(self.child.wait().await?)
        }
    }

    /// Unix-specific process manager built on process groups
    pub struct UnixProcessManager;

    impl Default for UnixProcessManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UnixProcessManager {
        fn command(command: &str, args: &[String], output: OutputMode) -> Command {
            let mut cmd = Command::new(command);
            cmd.args(args).stdin(Stdio::null());

            match output {
                OutputMode::Capture => {
                    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
                }
                OutputMode::Discard => {
                    cmd.stdout(Stdio::null()).stderr(Stdio::null());
                }
            }

            // Own process group so termination reaches the whole tree
            cmd.process_group(0);
            cmd
        }

        /// Send `sig` to the process group led by `pid`
        fn signal_group(pid: ProcessId, sig: Signal) -> TerminationResult {
            let pgid = NixPid::from_raw(pid as i32);

            match signal::killpg(pgid, sig) {
                Ok(()) => {
                    info!("Sent {} to process group {}", sig, pid);
                    TerminationResult::Success
                }
                Err(nix::errno::Errno::ESRCH) => {
                    info!("Process group {} not found (already terminated)", pid);
                    TerminationResult::ProcessNotFound
                }
                Err(nix::errno::Errno::EPERM) => {
                    warn!("Permission denied to signal process group {}", pid);
                    TerminationResult::AccessDenied
                }
                Err(e) => {
                    warn!("Failed to send {} to process group {}: {}", sig, pid, e);
                    TerminationResult::Failed(format!("{sig} to process group failed: {e}"))
                }
            }
        }

        fn spawn(
            command: &str,
            args: &[String],
            output: OutputMode,
        ) -> Result<Child, ProcessError> {
            let child = Self::command(command, args, output)
                .spawn()
                .map_err(|source| ProcessError::SpawnFailed {
                    command: command.to_string(),
                    source,
                })?;

            if let Some(pid) = child.id() {
                info!("Spawned Unix process: {} (PID: {})", command, pid);
            }

            Ok(child)
        }
    }

    async fn read_stream<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<String> {
        let mut buf = Vec::new();
        if let Some(mut reader) = reader {
            reader.read_to_end(&mut buf).await?;
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    #[async_trait]
    impl ProcessManager for UnixProcessManager {
        type Handle = UnixProcessHandle;

        fn new() -> Self {
            debug!("Initializing Unix process manager");
            UnixProcessManager
        }

        async fn spawn_process(
            &self,
            command: &str,
            args: &[String],
            output: OutputMode,
        ) -> Result<Self::Handle, ProcessError> {
            let child = Self::spawn(command, args, output)?;
            Ok(UnixProcessHandle::new(child, command.to_string()))
        }

        async fn run_captured(
            &self,
            command: &str,
            args: &[String],
            timeout: Duration,
        ) -> Result<ProcessOutput, ProcessError> {
            let mut child = Self::spawn(command, args, OutputMode::Capture)?;
            let pid = child.id();
            let stdout = child.stdout.take();
            let stderr = child.stderr.take();

            let completion = async {
                tokio::try_join!(child.wait(), read_stream(stdout), read_stream(stderr))
            };
            let outcome = tokio::time::timeout(timeout, completion).await;

            match outcome {
                Ok(Ok((status, stdout, stderr))) => {
                    info!("Process {} exited with {}", command, status);
                    Ok(ProcessOutput {
                        status,
                        stdout,
                        stderr,
                    })
                }
                Ok(Err(e)) => Err(ProcessError::IoError(e)),
                Err(_) => {
                    warn!("Process {} exceeded {:?}, killing its group", command, timeout);
                    if let Some(pid) = pid {
                        Self::signal_group(pid, Signal::SIGKILL);
                    }
                    // Reap the leader so no zombie is left behind
                    if let Err(e) = child.kill().await {
                        debug!("Kill after timeout reported: {}", e);
                    }
                    Err(ProcessError::Timeout(timeout))
                }
            }
        }

        async fn terminate_gracefully(&self, handle: &mut Self::Handle) -> TerminationResult {
            if !handle.is_running() {
                return TerminationResult::ProcessNotFound;
            }
            match handle.get_pid() {
                Some(pid) => Self::signal_group(pid, Signal::SIGTERM),
                None => TerminationResult::ProcessNotFound,
            }
        }

        async fn force_kill(&self, handle: &mut Self::Handle) -> TerminationResult {
            let Some(pid) = handle.get_pid() else {
                return TerminationResult::ProcessNotFound;
            };

            let result = Self::signal_group(pid, Signal::SIGKILL);
            // Also kill the leader directly and reap it
            if let Err(e) = handle.child.kill().await {
                debug!("Handle kill cleanup reported: {}", e);
            }
            result
        }

        fn terminate_detached(&self, handle: &mut Self::Handle) {
            if !handle.is_running() {
                return;
            }
            if let Some(pid) = handle.get_pid() {
                match Self::signal_group(pid, Signal::SIGTERM) {
                    TerminationResult::Success | TerminationResult::ProcessNotFound => {}
                    _ => {
                        // SIGTERM could not be delivered, try SIGKILL
                        Self::signal_group(pid, Signal::SIGKILL);
                    }
                }
            }
        }
    }
}

// Re-export the Unix implementation when on Unix systems
#[cfg(unix)]
pub use unix_impl::{UnixProcessHandle, UnixProcessManager};
