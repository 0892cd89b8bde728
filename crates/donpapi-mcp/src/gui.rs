use donpapi_mcp_core::{
    OutputMode, ProcessHandle, ProcessManager, StartGuiRequest, TerminationResult,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub const MSG_ALREADY_RUNNING: &str = "GUI is already running.";
pub const MSG_NOT_RUNNING: &str = "GUI is not running.";
pub const MSG_STOPPED: &str = "DonPAPI GUI stopped.";

/// Owner of the single background GUI process.
///
/// The tracked handle lives behind an async mutex; every operation takes the
/// lock first and re-checks liveness under it, so concurrent tool calls cannot
/// spawn a second instance.
pub struct GuiManager<M: ProcessManager> {
    process_manager: Arc<M>,
    executable: String,
    default_port: u16,
    stop_grace: Duration,
    process: Mutex<Option<M::Handle>>,
}

impl<M: ProcessManager> GuiManager<M> {
    pub fn new(
        process_manager: Arc<M>,
        executable: impl Into<String>,
        default_port: u16,
        stop_grace: Duration,
    ) -> Self {
        Self {
            process_manager,
            executable: executable.into(),
            default_port,
            stop_grace,
            process: Mutex::new(None),
        }
    }

    pub fn default_port(&self) -> u16 {
        self.default_port
    }

    /// Whether a tracked GUI process is alive right now.
    ///
    /// A handle whose process died on its own is dropped here.
    pub async fn is_running(&self) -> bool {
        let mut guard = self.process.lock().await;
        Self::live_handle(&mut guard).is_some()
    }

    fn live_handle(slot: &mut Option<M::Handle>) -> Option<&mut M::Handle> {
        if slot.as_mut().is_some_and(|handle| !handle.is_running()) {
            info!("Tracked GUI process exited on its own");
            *slot = None;
        }
        slot.as_mut()
    }

    /// Start the GUI unless one is already running
    pub async fn start(&self, request: &StartGuiRequest) -> String {
        let mut guard = self.process.lock().await;
        if Self::live_handle(&mut guard).is_some() {
            return MSG_ALREADY_RUNNING.to_string();
        }

        let bind = request.bind_or_default();
        let port = request.port_or(self.default_port);
        let args = request.to_args(self.default_port);

        match self
            .process_manager
            .spawn_process(&self.executable, &args, OutputMode::Discard)
            .await
        {
            Ok(handle) => {
                info!(
                    pid = ?handle.get_pid(),
                    command = handle.get_command(),
                    %bind,
                    port,
                    "DonPAPI GUI started"
                );
                *guard = Some(handle);
                format!("DonPAPI GUI started on http://{bind}:{port}")
            }
            Err(e) => {
                error!("Failed to start GUI: {}", e);
                format!("Failed to start GUI: {e}")
            }
        }
    }

    /// Stop the tracked GUI, waiting at most the grace period before killing it
    pub async fn stop(&self) -> String {
        let mut guard = self.process.lock().await;
        if Self::live_handle(&mut guard).is_none() {
            return MSG_NOT_RUNNING.to_string();
        }
        let Some(mut handle) = guard.take() else {
            return MSG_NOT_RUNNING.to_string();
        };

        match self
            .process_manager
            .shutdown(&mut handle, self.stop_grace)
            .await
        {
            TerminationResult::Success | TerminationResult::ProcessNotFound => {
                MSG_STOPPED.to_string()
            }
            TerminationResult::Forced => {
                warn!(
                    "GUI ignored SIGTERM for {:?}, it was killed",
                    self.stop_grace
                );
                format!(
                    "DonPAPI GUI stopped (forced kill after {:?} grace period).",
                    self.stop_grace
                )
            }
            other => {
                warn!("GUI termination did not complete cleanly: {:?}", other);
                format!("DonPAPI GUI stop requested, termination incomplete: {other:?}")
            }
        }
    }
}

impl<M: ProcessManager> Drop for GuiManager<M> {
    fn drop(&mut self) {
        if let Some(mut handle) = self.process.get_mut().take() {
            warn!("Emergency cleanup: terminating GUI process during drop");
            self.process_manager.terminate_detached(&mut handle);
        }
    }
}
