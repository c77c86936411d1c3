use std::path::Path;

use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::tool::{DEVICE_SERIAL, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushFileParams {
    /// Source on the local file system
    pub local_path:    String,
    /// Destination on the device
    pub remote_path:   String,
    /// Target device
    pub device_serial: Option<String>,
}

#[derive(ToolFn)]
#[tool_fn(params = "PushFileParams")]
pub struct PushFile;

impl PushFile {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(ParameterName::LocalPath, "Path of the local file to push")
            .required()
            .non_empty(),
        ParameterSpec::string(
            ParameterName::RemotePath,
            "Destination path on the device, e.g. /sdcard/Download/file.txt",
        )
        .required()
        .non_empty(),
        DEVICE_SERIAL,
    ];
}

async fn handle_impl(ctx: HandlerContext, params: PushFileParams) -> Result<ToolResponse> {
    let local = Path::new(&params.local_path);
    let size = match tokio::fs::metadata(local).await {
        Ok(metadata) if metadata.is_file() => metadata.len(),
        _ => {
            return Err(Report::new(Error::NotFound(format!(
                "Local file '{}' not found",
                params.local_path
            ))));
        }
    };

    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    let output = sdk.push(&device.serial, local, &params.remote_path).await?;
    if !output.success() {
        return Err(Report::new(Error::failed_to(
            format!("push file to device {}", device.serial),
            output.failure_detail(),
        )));
    }

    Ok(ToolResponse::text(format!(
        "Successfully pushed '{}' ({size} bytes) to '{}' on device {}",
        params.local_path, params.remote_path, device.serial
    )))
}

#[allow(clippy::unwrap_used, reason = "test failures should panic")]
#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::sdk::CommandOutput;
    use crate::sdk::testing::{ONE_EMULATOR, ScriptedRunner};
    use crate::tool::ToolName;
    use crate::tool::testing::invoke;

    #[tokio::test]
    async fn test_pushes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.json");
        std::fs::write(&file, "{\"debug\":true}").unwrap();
        let local = file.to_string_lossy().into_owned();

        let runner = ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            &format!("adb -s emulator-5554 push {local} /sdcard/config.json"),
            CommandOutput::ok("1 file pushed, 0 skipped."),
        );
        let (text, _) = invoke(
            ToolName::AndroidPushFile,
            json!({ "localPath": local, "remotePath": "/sdcard/config.json" }),
            runner,
        )
        .await;
        assert_eq!(
            text,
            format!(
                "Successfully pushed '{local}' (14 bytes) to '/sdcard/config.json' on device \
                 emulator-5554"
            )
        );
    }

    #[tokio::test]
    async fn test_missing_local_file_is_checked_first() {
        let (text, runner) = invoke(
            ToolName::AndroidPushFile,
            json!({ "localPath": "/no/such/file.txt", "remotePath": "/sdcard/file.txt" }),
            ScriptedRunner::new().with_devices(ONE_EMULATOR),
        )
        .await;
        assert_eq!(text, "Error: Local file '/no/such/file.txt' not found");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_push_failure_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "a").unwrap();

        let runner = ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            "adb -s emulator-5554 push *",
            CommandOutput::failed(1, "adb: error: failed to copy: Read-only file system"),
        );
        let (text, _) = invoke(
            ToolName::AndroidPushFile,
            json!({ "localPath": file.to_string_lossy(), "remotePath": "/system/a.txt" }),
            runner,
        )
        .await;
        assert_eq!(
            text,
            "Failed to push file to device emulator-5554: \
             adb: error: failed to copy: Read-only file system"
        );
    }
}
