use std::future::Future;
use std::pin::Pin;

use rmcp::model::CallToolResult;
use serde::de::DeserializeOwned;

use super::HandlerContext;
use super::response::ToolResponse;
use crate::error::{Error, Result};

/// Type alias for the future returned by a tool handler
///
/// Breaking down the type:
/// - `Pin<Box<...>>`: Heap-allocated Future that won't move in memory
/// - `Output = Result<ToolResponse>`: success text, or an error that becomes text
/// - `+ Send + 'static`: owns its `HandlerContext`, so it can run on any worker
pub type HandlerResponse = Pin<Box<dyn Future<Output = Result<ToolResponse>> + Send>>;

/// A tool with typed parameters. Usually implemented with `#[derive(ToolFn)]`.
pub trait ToolFn: Send + Sync {
    /// Parameters deserialized from the validated argument bag
    type Params: DeserializeOwned + Send + 'static;

    /// Run the tool
    fn call(&self, ctx: HandlerContext, params: Self::Params) -> HandlerResponse;

    /// Outcome decided from the raw arguments before they are validated as a whole.
    /// `None` continues with normal validation.
    fn preflight(&self, _ctx: &HandlerContext) -> Option<Result<ToolResponse>> {
        None
    }
}

/// Type-erased tool used by `ToolDef`. Runs the whole invocation lifecycle and always
/// produces exactly one text block.
pub trait ErasedToolFn: Send + Sync {
    /// Validate, run, and render the result
    fn call_erased(&self, ctx: HandlerContext) -> Pin<Box<dyn Future<Output = CallToolResult> + Send + '_>>;
}

impl<T: ToolFn> ErasedToolFn for T {
    fn call_erased(&self, ctx: HandlerContext) -> Pin<Box<dyn Future<Output = CallToolResult> + Send + '_>> {
        Box::pin(async move {
            let tool_name = ctx.tool_name();
            let outcome = match self.preflight(&ctx) {
                Some(outcome) => outcome,
                None => match ctx.extract_parameter_values::<T::Params>() {
                    // spawned so a panicking handler still yields a result
                    Ok(params) => match tokio::spawn(self.call(ctx, params)).await {
                        Ok(outcome) => outcome,
                        Err(join_error) => Err(error_stack::Report::new(Error::Internal(
                            format!("{tool_name} failed unexpectedly: {join_error}"),
                        ))),
                    },
                    Err(report) => Err(report),
                },
            };

            let response = match outcome {
                Ok(response) => response,
                Err(report) => {
                    tracing::warn!("{tool_name} failed: {report:?}");
                    ToolResponse::text(report.current_context().to_string())
                }
            };
            response.into_call_tool_result()
        })
    }
}
