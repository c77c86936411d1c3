use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::constants::SHELL_TIMEOUT;
use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::tool::{HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopAvdParams {
    /// Emulator to stop
    pub device_serial: Option<String>,
    /// Kill the emulator instead of powering it off
    pub force:         bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "StopAvdParams")]
pub struct StopAvd;

impl StopAvd {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(
            ParameterName::DeviceSerial,
            "Serial of the emulator to stop, e.g. emulator-5554. Defaults to the first running \
             emulator",
        ),
        ParameterSpec::boolean(
            ParameterName::Force,
            "Kill the emulator immediately instead of requesting a power-off",
        ),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: StopAvdParams) -> Result<ToolResponse> {
    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::EmulatorOnly)
        .await?;

    if params.force {
        let output = sdk.emu_kill(&device.serial).await?;
        if !output.success() {
            return Err(Report::new(Error::failed_to(
                format!("stop emulator {}", device.serial),
                output.failure_detail(),
            )));
        }
        return Ok(ToolResponse::text(format!(
            "Kill issued for AVD {}. It leaves android-devices once the emulator exits.",
            device.serial
        )));
    }

    // The bridge connection drops while the device powers down, so a failed exit here
    // does not mean the request was lost
    let output = sdk.shell(&device.serial, "reboot -p", SHELL_TIMEOUT).await?;
    if !output.success() {
        tracing::debug!(
            "Power-off of {} exited with {:?}: {}",
            device.serial,
            output.status,
            output.failure_detail()
        );
    }

    Ok(ToolResponse::text(format!(
        "Power-off requested for AVD {}. It leaves android-devices once shutdown completes.",
        device.serial
    )))
}
