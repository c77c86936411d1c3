use std::sync::Arc;

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::arguments::extract_parameters;
use super::parameters::ParameterSpec;
use super::tool_name::ToolName;
use crate::error::Result;
use crate::sdk::{Sdk, SdkEnvironment};

/// Context handed to every tool: its raw arguments, the SDK environment, and the
/// request's cancellation token
#[derive(Clone)]
pub struct HandlerContext {
    tool_name:   ToolName,
    arguments:   Option<JsonObject>,
    environment: Arc<SdkEnvironment>,
    cancel:      CancellationToken,
}

impl HandlerContext {
    pub(crate) const fn new(
        tool_name: ToolName,
        arguments: Option<JsonObject>,
        environment: Arc<SdkEnvironment>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            tool_name,
            arguments,
            environment,
            cancel,
        }
    }

    /// Tool being invoked
    pub const fn tool_name(&self) -> ToolName {
        self.tool_name
    }

    /// SDK session bound to this request's cancellation
    pub fn sdk(&self) -> Sdk<'_> {
        self.environment.session(&self.cancel)
    }

    /// Validate the raw arguments against the tool's parameters and deserialize them
    ///
    /// # Errors
    /// Returns a validation error naming the offending parameter.
    pub fn extract_parameter_values<T: DeserializeOwned>(&self) -> Result<T> {
        extract_parameters(self.tool_name.get_parameters(), self.arguments.as_ref())
    }

    /// Like [`Self::extract_parameter_values`], checking only `specs` and ignoring every
    /// other argument
    ///
    /// # Errors
    /// Returns a validation error naming the offending parameter.
    pub fn extract_parameter_subset<T: DeserializeOwned>(
        &self,
        specs: &[ParameterSpec],
    ) -> Result<T> {
        extract_parameters(specs, self.arguments.as_ref())
    }
}
