use crate::gui::GuiManager;
use crate::registry::{self, Operation, ToolSpec};
use crate::runner::CommandRunner;
use donpapi_mcp_core::{
    AdapterConfig, AdapterError, CollectRequest, JsonObject, ProcessManager, StartGuiRequest,
    parse_arguments,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Text payload handed back for a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    /// Set when the caller's arguments were rejected
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<AdapterError> for ToolOutput {
    fn from(error: AdapterError) -> Self {
        ToolOutput::error(error.to_string())
    }
}

/// Routes named operations to the command runner or the GUI manager
pub struct DonpapiTools<M: ProcessManager> {
    runner: CommandRunner<M>,
    gui: GuiManager<M>,
}

impl<M: ProcessManager> DonpapiTools<M> {
    pub fn new(config: &AdapterConfig, process_manager: Arc<M>) -> Self {
        Self {
            runner: CommandRunner::new(
                process_manager.clone(),
                config.executable.clone(),
                config.timeout(),
            ),
            gui: GuiManager::new(
                process_manager,
                config.executable.clone(),
                config.gui_port,
                config.gui_stop_grace(),
            ),
        }
    }

    pub fn runner(&self) -> &CommandRunner<M> {
        &self.runner
    }

    pub fn gui(&self) -> &GuiManager<M> {
        &self.gui
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        registry::tool_specs()
    }

    pub fn tools(&self) -> Vec<rmcp::model::Tool> {
        self.specs()
            .iter()
            .map(|spec| spec.to_tool(self.gui.default_port()))
            .collect()
    }

    /// Execute the operation called `name`.
    ///
    /// Never fails: unknown names and invalid arguments are described in the
    /// returned payload.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> ToolOutput {
        let operation = match name.parse::<Operation>() {
            Ok(operation) => operation,
            Err(message) => {
                warn!("Rejected call to unknown tool {}", name);
                return ToolOutput::text(message);
            }
        };

        info!(tool = operation.name(), "Dispatching tool call");

        match self.execute(operation, arguments).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = operation.name(), "Tool call rejected: {}", e);
                e.into()
            }
        }
    }

    async fn execute(
        &self,
        operation: Operation,
        arguments: Option<JsonObject>,
    ) -> Result<ToolOutput, AdapterError> {
        let output = match operation {
            Operation::Collect => {
                let request: CollectRequest = parse_arguments(operation.name(), arguments)?;
                let result = self.runner.collect(&request).await;
                ToolOutput::text(result.to_pretty_json())
            }
            Operation::StartGui => {
                let request: StartGuiRequest = parse_arguments(operation.name(), arguments)?;
                ToolOutput::text(self.gui.start(&request).await)
            }
            Operation::StopGui => ToolOutput::text(self.gui.stop().await),
        };
        Ok(output)
    }

    /// Stop the GUI if it is running; used when the session ends
    pub async fn shutdown(&self) {
        if self.gui.is_running().await {
            info!("Stopping GUI before exit: {}", self.gui.stop().await);
        }
    }
}
