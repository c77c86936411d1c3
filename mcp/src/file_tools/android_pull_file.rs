use std::path::Path;

use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::constants::SHELL_TIMEOUT;
use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::sdk::shell_quote;
use crate::tool::{DEVICE_SERIAL, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

const PRESENT: &str = "present";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullFileParams {
    /// Source on the device
    pub remote_path:   String,
    /// Destination on the local file system
    pub local_path:    String,
    /// Target device
    pub device_serial: Option<String>,
}

#[derive(ToolFn)]
#[tool_fn(params = "PullFileParams")]
pub struct PullFile;

impl PullFile {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(
            ParameterName::RemotePath,
            "Path of the file on the device, e.g. /sdcard/Download/file.txt",
        )
        .required()
        .non_empty(),
        ParameterSpec::string(
            ParameterName::LocalPath,
            "Destination path on the local system; missing directories are created",
        )
        .required()
        .non_empty(),
        DEVICE_SERIAL,
    ];
}

async fn handle_impl(ctx: HandlerContext, params: PullFileParams) -> Result<ToolResponse> {
    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    let probe = format!(
        "test -f {} && echo {PRESENT} || echo missing",
        shell_quote(&params.remote_path)
    );
    let output = sdk.shell(&device.serial, &probe, SHELL_TIMEOUT).await?;
    if output.stdout.trim() != PRESENT {
        return Err(Report::new(Error::NotFound(format!(
            "Remote file '{}' not found on device {}",
            params.remote_path, device.serial
        ))));
    }

    let local = Path::new(&params.local_path);
    if let Some(parent) = local.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Report::new(Error::io_failed("create directory", parent, e)))?;
    }

    let output = sdk.pull(&device.serial, &params.remote_path, local).await?;
    if !output.success() {
        return Err(Report::new(Error::failed_to(
            format!("pull file from device {}", device.serial),
            output.failure_detail(),
        )));
    }

    let size = match tokio::fs::metadata(local).await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            return Err(Report::new(Error::failed_to(
                format!("pull file from device {}", device.serial),
                format!("'{}' was not written", params.local_path),
            ))
            .attach(e.to_string())
            .attach(format!("adb output: {}", output.combined())));
        }
    };

    Ok(ToolResponse::text(format!(
        "Successfully pulled '{}' from device {} to '{}' ({size} bytes)",
        params.remote_path, device.serial, params.local_path
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

    const PROBE: &str =
        "adb -s emulator-5554 shell test -f '/sdcard/a b.txt' && echo present || echo missing";

    #[tokio::test]
    async fn test_missing_remote_file_stops_before_pull() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new()
            .with_devices(ONE_EMULATOR)
            .on(PROBE, CommandOutput::ok("missing\n"));
        let (text, runner) = invoke(
            ToolName::AndroidPullFile,
            json!({
                "remotePath": "/sdcard/a b.txt",
                "localPath": dir.path().join("out.txt").to_string_lossy()
            }),
            runner,
        )
        .await;

        assert_eq!(
            text,
            "Error: Remote file '/sdcard/a b.txt' not found on device emulator-5554"
        );
        assert!(!runner.calls().iter().any(|call| call.contains(" pull ")));
    }

    #[tokio::test]
    async fn test_pull_creates_parent_and_checks_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("nested").join("out.txt");
        let runner = ScriptedRunner::new()
            .with_devices(ONE_EMULATOR)
            .on(PROBE, CommandOutput::ok("present\n"));

        // the scripted pull writes nothing, so the local check must fail
        let (text, _) = invoke(
            ToolName::AndroidPullFile,
            json!({ "remotePath": "/sdcard/a b.txt", "localPath": local.to_string_lossy() }),
            runner,
        )
        .await;

        assert!(dir.path().join("nested").is_dir());
        assert!(text.starts_with("Failed to pull file from device emulator-5554: "));
        assert!(text.contains("was not written"));
    }

    #[tokio::test]
    async fn test_pull_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("out.txt");
        // stands in for the file adb would have written
        std::fs::write(&local, "hello").unwrap();
        let runner = ScriptedRunner::new()
            .with_devices(ONE_EMULATOR)
            .on(PROBE, CommandOutput::ok("present\n"));

        let (text, runner) = invoke(
            ToolName::AndroidPullFile,
            json!({ "remotePath": "/sdcard/a b.txt", "localPath": local.to_string_lossy() }),
            runner,
        )
        .await;

        assert_eq!(
            text,
            format!(
                "Successfully pulled '/sdcard/a b.txt' from device emulator-5554 to '{}' (5 bytes)",
                local.display()
            )
        );
        assert!(
            runner
                .calls()
                .iter()
                .any(|call| call.starts_with("adb -s emulator-5554 pull /sdcard/a b.txt"))
        );
    }
}
