use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::constants::SHELL_TIMEOUT;
use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::tool::{DEVICE_SERIAL, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellParams {
    /// Command line interpreted by the device shell
    pub command:       String,
    /// Target device
    pub device_serial: Option<String>,
}

#[derive(ToolFn)]
#[tool_fn(params = "ShellParams")]
pub struct Shell;

impl Shell {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(
            ParameterName::Command,
            "Shell command to execute on the device, e.g. 'getprop ro.build.version.release'",
        )
        .required()
        .non_empty(),
        DEVICE_SERIAL,
    ];
}

async fn handle_impl(ctx: HandlerContext, params: ShellParams) -> Result<ToolResponse> {
    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    tracing::debug!("Running '{}' on {}", params.command, device.serial);
    let output = sdk
        .shell(&device.serial, &params.command, SHELL_TIMEOUT)
        .await?;
    if !output.success() {
        return Err(Report::new(Error::failed_to(
            format!("execute shell command on device {}", device.serial),
            output.failure_detail(),
        )));
    }

    let captured = output.stdout.trim_end();
    let captured = if captured.is_empty() {
        "(no output)"
    } else {
        captured
    };
    Ok(ToolResponse::text(format!(
        "Shell command '{}' executed on device {} ({}):\n\n{captured}",
        params.command,
        device.serial,
        device.model.as_deref().unwrap_or("Unknown Model"),
    )))
}
