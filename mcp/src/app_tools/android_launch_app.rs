use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use super::{validate_activity_name, validate_package_name};
use crate::config::SuccessMarkers;
use crate::constants::{LAUNCHER_CATEGORY, SHELL_TIMEOUT};
use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::sdk::CommandOutput;
use crate::tool::{DEVICE_SERIAL, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchAppParams {
    /// Package to launch
    pub package_name:  String,
    /// Explicit activity; the launcher activity when absent
    pub activity_name: Option<String>,
    /// Target device
    pub device_serial: Option<String>,
}

#[derive(ToolFn)]
#[tool_fn(params = "LaunchAppParams")]
pub struct LaunchApp;

impl LaunchApp {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(
            ParameterName::PackageName,
            "Package name of the app to launch, e.g. com.example.app",
        )
        .required()
        .non_empty(),
        ParameterSpec::string(
            ParameterName::ActivityName,
            "Activity to start, e.g. .MainActivity. Defaults to the launcher activity",
        ),
        DEVICE_SERIAL,
    ];
}

async fn handle_impl(ctx: HandlerContext, params: LaunchAppParams) -> Result<ToolResponse> {
    let package = params.package_name.trim();
    validate_package_name(package)?;
    let activity = params
        .activity_name
        .as_deref()
        .map(str::trim)
        .filter(|activity| !activity.is_empty());
    if let Some(activity) = activity {
        validate_activity_name(activity)?;
    }

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

    let (command, target) = activity.map_or_else(
        || {
            (
                format!("monkey -p {package} -c {LAUNCHER_CATEGORY} 1"),
                package.to_string(),
            )
        },
        |activity| {
            (
                format!("am start -n {package}/{activity}"),
                format!("{package}/{activity}"),
            )
        },
    );
    let output = sdk.shell(&device.serial, &command, SHELL_TIMEOUT).await?;

    if !launched(sdk.markers(), &output) {
        return Err(Report::new(Error::failed_to(
            format!("launch '{target}' on device {}", device.serial),
            output.failure_detail(),
        )));
    }

    Ok(ToolResponse::text(format!(
        "Successfully launched '{target}' on device {}",
        device.serial
    )))
}

/// `am start` prints `Starting:` before it reports a missing activity, so failure
/// markers win over success markers
fn launched(markers: &SuccessMarkers, output: &CommandOutput) -> bool {
    let text = output.combined();
    output.success()
        && !SuccessMarkers::matches(&markers.launch_failure, &text)
        && (SuccessMarkers::matches(&markers.launch, &text) || text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sdk::testing::{ONE_EMULATOR, ScriptedRunner};
    use crate::tool::ToolName;
    use crate::tool::testing::invoke;

    fn runner() -> ScriptedRunner {
        ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            "adb -s emulator-5554 shell pm list packages",
            CommandOutput::ok("package:com.example.app\n"),
        )
    }

    #[test]
    fn test_launch_detection() {
        let markers = SuccessMarkers::default();
        assert!(launched(
            &markers,
            &CommandOutput::ok("Events injected: 1\n## Network stats")
        ));
        assert!(launched(&markers, &CommandOutput::ok("")));
        assert!(!launched(
            &markers,
            &CommandOutput::ok(
                "Starting: Intent { cmp=com.example.app/.Missing }\n\
                 Error type 3\nError: Activity class {com.example.app/.Missing} does not exist."
            )
        ));
        assert!(!launched(
            &markers,
            &CommandOutput::ok("** No activities found to run, monkey aborted.")
        ));
        assert!(!launched(&markers, &CommandOutput::failed(255, "")));
    }

    #[tokio::test]
    async fn test_launches_launcher_activity() {
        let runner = runner().on(
            "adb -s emulator-5554 shell monkey -p com.example.app -c \
             android.intent.category.LAUNCHER 1",
            CommandOutput::ok("Events injected: 1\n"),
        );
        let (text, _) = invoke(
            ToolName::AndroidLaunchApp,
            json!({ "packageName": "com.example.app" }),
            runner,
        )
        .await;
        assert_eq!(
            text,
            "Successfully launched 'com.example.app' on device emulator-5554"
        );
    }

    #[tokio::test]
    async fn test_launches_explicit_activity() {
        let runner = runner().on(
            "adb -s emulator-5554 shell am start -n com.example.app/.MainActivity",
            CommandOutput::ok("Starting: Intent { cmp=com.example.app/.MainActivity }\n"),
        );
        let (text, _) = invoke(
            ToolName::AndroidLaunchApp,
            json!({ "packageName": "com.example.app", "activityName": ".MainActivity" }),
            runner,
        )
        .await;
        assert_eq!(
            text,
            "Successfully launched 'com.example.app/.MainActivity' on device emulator-5554"
        );
    }

    #[tokio::test]
    async fn test_package_must_be_installed() {
        let (text, _) = invoke(
            ToolName::AndroidLaunchApp,
            json!({ "packageName": "com.missing.app" }),
            runner(),
        )
        .await;
        assert!(text.contains("'com.missing.app' is not installed"));
    }
}
