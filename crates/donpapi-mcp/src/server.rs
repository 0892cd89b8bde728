use crate::dispatch::DonpapiTools;
use donpapi_mcp_core::{AdapterConfig, ProcessManager};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

/// MCP server exposing the DonPAPI operations as tools
pub struct DonpapiServer<M: ProcessManager> {
    tools: Arc<DonpapiTools<M>>,
    instructions: String,
}

impl<M: ProcessManager> DonpapiServer<M> {
    pub fn new(tools: Arc<DonpapiTools<M>>, config: &AdapterConfig) -> Self {
        let instructions = format!(
            "Runs DonPAPI to dump secrets remotely from Windows hosts. \
             Use donpapi_collect for a collection run, then donpapi_start_gui to \
             browse the results. Collected data is stored by DonPAPI under {}.",
            config.output_dir.display()
        );
        Self {
            tools,
            instructions,
        }
    }
}

impl<M: ProcessManager + 'static> ServerHandler for DonpapiServer<M> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = env!("CARGO_PKG_NAME").to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = Some(self.instructions.clone());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools.tools(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let output = self
            .tools
            .dispatch(&request.name, request.arguments)
            .await;

        let content = vec![Content::text(output.text)];
        if output.is_error {
            Ok(CallToolResult::error(content))
        } else {
            Ok(CallToolResult::success(content))
        }
    }
}
