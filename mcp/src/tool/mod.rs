mod annotations;
mod arguments;
mod handler_context;
mod parameters;
mod response;
mod tool_def;
mod tool_name;
mod types;

use serde::Deserialize;

pub use handler_context::HandlerContext;
pub use parameters::{DEVICE_SERIAL, DefaultValue, ParameterName, ParameterSpec};
pub use response::{Page, ToolResponse, filter_entries, filter_suffix};
pub use tool_def::ToolDef;
pub use tool_name::{ToolName, get_all_tool_definitions};
pub use types::{HandlerResponse, ToolFn};

/// Parameters of tools that take none
#[derive(Debug, Deserialize)]
pub struct NoParams {}
