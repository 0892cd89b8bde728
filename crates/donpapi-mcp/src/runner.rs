use donpapi_mcp_core::{CollectRequest, InvocationResult, ProcessManager, command_line};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Runs one-shot invocations of the external tool with a bounded wait
pub struct CommandRunner<M> {
    process_manager: Arc<M>,
    executable: String,
    timeout: Duration,
}

impl<M: ProcessManager> CommandRunner<M> {
    pub fn new(process_manager: Arc<M>, executable: impl Into<String>, timeout: Duration) -> Self {
        Self {
            process_manager,
            executable: executable.into(),
            timeout,
        }
    }

    /// Run the external tool with `args` and the configured timeout
    pub async fn run(&self, args: &[String]) -> InvocationResult {
        self.run_with_timeout(args, self.timeout).await
    }

    /// Run the external tool with `args`, giving up after `timeout`.
    ///
    /// Never fails: launch errors and timeouts come back as a failed
    /// [`InvocationResult`] carrying the description.
    pub async fn run_with_timeout(&self, args: &[String], timeout: Duration) -> InvocationResult {
        let command = command_line(&self.executable, args);

        let outcome = self
            .process_manager
            .run_captured(&self.executable, args, timeout)
            .await;

        match &outcome {
            Ok(output) if output.success() => info!("{} finished successfully", self.executable),
            Ok(output) => warn!("{} exited with {}", self.executable, output.status),
            Err(e) => warn!("{} could not complete: {}", self.executable, e),
        }

        InvocationResult::from_outcome(outcome, command)
    }

    /// Execute a collection run
    pub async fn collect(&self, request: &CollectRequest) -> InvocationResult {
        info!(
            targets = request.targets.split_whitespace().count(),
            kerberos = request.uses_kerberos(),
            "Starting collection"
        );
        debug!("Collection arguments: {:?}", request.to_redacted_args());

        self.run(&request.to_args()).await
    }
}
