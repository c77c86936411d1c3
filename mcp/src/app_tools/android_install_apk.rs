use std::path::Path;

use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::tool::{DEVICE_SERIAL, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallApkParams {
    /// Local APK file
    pub apk_path:      String,
    /// Target device
    pub device_serial: Option<String>,
    /// Replace an existing installation
    pub reinstall:     bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "InstallApkParams")]
pub struct InstallApk;

impl InstallApk {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(ParameterName::ApkPath, "Path to the APK file on the local system")
            .required()
            .non_empty(),
        DEVICE_SERIAL,
        ParameterSpec::boolean(
            ParameterName::Reinstall,
            "Replace an existing installation, keeping its data",
        ),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: InstallApkParams) -> Result<ToolResponse> {
    let apk = Path::new(&params.apk_path);
    let size = match tokio::fs::metadata(apk).await {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        _ => {
            return Err(Report::new(Error::NotFound(format!(
                "APK file not found at path: {}",
                params.apk_path
            ))));
        }
    };
    let file_name = apk
        .file_name()
        .map_or_else(|| params.apk_path.clone(), |name| name.to_string_lossy().into_owned());

    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    let output = sdk.install(&device.serial, apk, params.reinstall).await?;
    if !output.success() {
        return Err(Report::new(Error::failed_to(
            format!("install '{file_name}' on device {}", device.serial),
            output.failure_detail(),
        )));
    }

    let mode = if params.reinstall {
        " (reinstalled)"
    } else {
        ""
    };
    Ok(ToolResponse::text(format!(
        "Successfully installed '{file_name}' ({size} bytes) on device {} ({}){mode}",
        device.serial,
        device.model.as_deref().unwrap_or("Unknown Model"),
    )))
}
