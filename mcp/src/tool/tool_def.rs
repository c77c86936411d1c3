//! Tool definition registered with the MCP service

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tokio_util::sync::CancellationToken;

use super::HandlerContext;
use super::annotations::Annotation;
use super::parameters::{ParameterSpec, build_input_schema};
use super::tool_name::ToolName;
use super::types::ErasedToolFn;
use crate::sdk::SdkEnvironment;

/// Everything the service needs to advertise and run one tool
#[derive(Clone)]
pub struct ToolDef {
    /// Tool name and description
    pub tool_name:   ToolName,
    /// Tool annotations
    pub annotations: Annotation,
    /// Handler function
    pub handler:     Arc<dyn ErasedToolFn>,
    /// Input contract
    pub parameters:  &'static [ParameterSpec],
}

impl ToolDef {
    pub fn name(&self) -> &'static str {
        self.tool_name.into()
    }

    /// Run the tool. Failures are already rendered as text in the result.
    pub async fn invoke(
        &self,
        arguments: Option<JsonObject>,
        environment: Arc<SdkEnvironment>,
        cancel: CancellationToken,
    ) -> CallToolResult {
        tracing::debug!("Invoking {} with {arguments:?}", self.tool_name);
        let ctx = HandlerContext::new(self.tool_name, arguments, environment, cancel);
        self.handler.call_erased(ctx).await
    }

    /// Convert to MCP Tool for registration
    pub fn to_tool(&self) -> Tool {
        let mut tool = Tool::new(
            self.name(),
            self.tool_name.description(),
            Arc::new(build_input_schema(self.parameters)),
        );
        tool.title = Some(self.annotations.full_title());
        tool.annotations = Some(self.annotations.clone().into());
        tool
    }
}
