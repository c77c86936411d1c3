use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use super::validate_package_name;
use crate::config::SuccessMarkers;
use crate::constants::SHELL_TIMEOUT;
use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::tool::{DEVICE_SERIAL, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UninstallAppParams {
    /// Package to remove
    pub package_name:  String,
    /// Target device
    pub device_serial: Option<String>,
    /// Keep the data and cache directories
    pub keep_data:     bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "UninstallAppParams")]
pub struct UninstallApp;

impl UninstallApp {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(
            ParameterName::PackageName,
            "Package name of the app to uninstall, e.g. com.example.app",
        )
        .required()
        .non_empty(),
        DEVICE_SERIAL,
        ParameterSpec::boolean(
            ParameterName::KeepData,
            "Keep the app's data and cache directories",
        ),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: UninstallAppParams) -> Result<ToolResponse> {
    let package = params.package_name.trim();
    validate_package_name(package)?;

    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    if !sdk.is_package_installed(&device.serial, package).await? {
        return Err(Report::new(Error::NotFound(format!(
            "Package '{package}' is not installed on device {}",
            device.serial
        ))));
    }

    let command = if params.keep_data {
        format!("pm uninstall -k {package}")
    } else {
        format!("pm uninstall {package}")
    };
    let output = sdk.shell(&device.serial, &command, SHELL_TIMEOUT).await?;

    // `pm uninstall` exits 0 on failure on many Android versions
    if !SuccessMarkers::matches(&sdk.markers().uninstall, &output.combined()) {
        return Err(Report::new(Error::failed_to(
            format!("uninstall '{package}' from device {}", device.serial),
            output.failure_detail(),
        )));
    }

    let data = if params.keep_data {
        "data preserved"
    } else {
        "data removed"
    };
    Ok(ToolResponse::text(format!(
        "Successfully uninstalled '{package}' from device {} ({data})",
        device.serial
    )))
}
