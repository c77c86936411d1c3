use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};

use crate::sdk::SdkEnvironment;
use crate::tool::{self, ToolDef};

const INSTRUCTIONS: &str = "Android development tools backed by adb, the emulator, avdmanager and \
                            sdkmanager.\n\nStart with android-devices to see what is connected. \
                            Tools that take deviceSerial default to the first online device.";

/// MCP service exposing the Android device, emulator and SDK tools.
///
/// Holds no per-device state: every call re-queries the external tools.
#[derive(Clone)]
pub struct McpService {
    /// Tool definitions `HashMap` for O(1) lookup by name
    tool_defs:   HashMap<String, ToolDef>,
    /// Pre-converted MCP tools for list operations
    tools:       Vec<Tool>,
    /// Command runner and markers shared by every invocation
    environment: Arc<SdkEnvironment>,
}

impl McpService {
    pub fn new(environment: SdkEnvironment) -> Self {
        let all_defs = tool::get_all_tool_definitions();
        let mut tools: Vec<_> = all_defs.iter().map(ToolDef::to_tool).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        let tool_defs = all_defs
            .into_iter()
            .map(|def| (def.name().to_string(), def))
            .collect();

        Self {
            tool_defs,
            tools,
            environment: Arc::new(environment),
        }
    }

    /// Get tool definition by name with O(1) lookup
    pub fn get_tool_def(&self, name: &str) -> Option<&ToolDef> {
        self.tool_defs.get(name)
    }

    /// List all MCP tools using pre-converted and sorted tools
    pub fn list_mcp_tools(&self) -> ListToolsResult {
        ListToolsResult::with_all_items(self.tools.clone())
    }
}

impl ServerHandler for McpService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(Implementation::from_build_env())
            .with_instructions(INSTRUCTIONS.to_string())
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(self.list_mcp_tools())
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let Some(tool_def) = self.get_tool_def(&request.name) else {
            tracing::warn!("Unknown tool requested: {}", request.name);
            return Err(McpError::invalid_params(
                format!("unknown tool: {}", request.name),
                None,
            ));
        };

        Ok(tool_def
            .invoke(request.arguments, Arc::clone(&self.environment), context.ct)
            .await)
    }
}
