use android_dev_mcp_macros::ToolFn;
use serde::Deserialize;

use crate::constants::MAX_PACKAGES_DISPLAYED;
use crate::device::DeviceScope;
use crate::error::Result;
use crate::tool::{
    DEVICE_SERIAL, HandlerContext, Page, ParameterName, ParameterSpec, ToolResponse,
    filter_entries, filter_suffix,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPackagesParams {
    /// Target device
    pub device_serial:       Option<String>,
    /// Case-insensitive substring filter
    pub filter:              Option<String>,
    /// Include uninstalled packages that kept their data
    pub include_uninstalled: bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "ListPackagesParams")]
pub struct ListPackages;

impl ListPackages {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        DEVICE_SERIAL,
        ParameterSpec::string(
            ParameterName::Filter,
            "Only list packages whose name contains this text (case-insensitive)",
        ),
        ParameterSpec::boolean(
            ParameterName::IncludeUninstalled,
            "Also list packages that were uninstalled but kept their data",
        ),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: ListPackagesParams) -> Result<ToolResponse> {
    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    let packages = sdk
        .list_packages(&device.serial, params.include_uninstalled)
        .await?;
    if packages.is_empty() {
        return Ok(ToolResponse::text(format!(
            "No packages found on device {}",
            device.serial
        )));
    }

    let filter = params.filter.as_deref();
    let packages = filter_entries(packages, filter, String::as_str);
    if packages.is_empty() {
        return Ok(ToolResponse::text(format!(
            "No packages found matching filter '{}' on device {}",
            filter.unwrap_or_default().trim(),
            device.serial
        )));
    }

    let page = Page::first(packages, MAX_PACKAGES_DISPLAYED);
    Ok(ToolResponse::text(format!(
        "Found {} package(s) on device {}{}:\n\nShowing {} packages:\n{}{}",
        page.total,
        device.serial,
        filter_suffix(filter),
        page.shown.len(),
        page.shown.join("\n"),
        page.truncation_note("packages"),
    )))
}

#[allow(clippy::unwrap_used, reason = "test failures should panic")]
#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use serde_json::json;

    use crate::sdk::CommandOutput;
    use crate::sdk::testing::{ONE_EMULATOR, ScriptedRunner};
    use crate::tool::ToolName;
    use crate::tool::testing::invoke;

    fn runner_with(count: usize) -> ScriptedRunner {
        let mut listing = String::new();
        for index in 0..count {
            writeln!(listing, "package:com.example.app{index:03}").unwrap();
        }
        writeln!(listing, "package:com.google.android.gms").unwrap();
        ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            "adb -s emulator-5554 shell pm list packages*",
            CommandOutput::ok(listing),
        )
    }

    #[tokio::test]
    async fn test_over_cap_reports_remainder() {
        let (text, _) = invoke(
            ToolName::AndroidListPackages,
            json!({ "filter": "example" }),
            runner_with(120),
        )
        .await;

        assert!(text.starts_with(
            "Found 120 package(s) on device emulator-5554 (filtered by 'example'):\n\n\
             Showing 50 packages:\ncom.example.app000\n"
        ));
        assert!(text.contains("com.example.app049"));
        assert!(!text.contains("com.example.app050"));
        assert!(text.ends_with("\n\n... and 70 more packages. Use filter to narrow results."));
    }

    #[tokio::test]
    async fn test_unmatched_filter_names_filter() {
        let (text, _) = invoke(
            ToolName::AndroidListPackages,
            json!({ "filter": "zzz" }),
            runner_with(3),
        )
        .await;
        assert_eq!(
            text,
            "No packages found matching filter 'zzz' on device emulator-5554"
        );
    }

    #[tokio::test]
    async fn test_include_uninstalled_flag() {
        let (text, runner) = invoke(
            ToolName::AndroidListPackages,
            json!({ "includeUninstalled": true, "filter": "GOOGLE" }),
            runner_with(0),
        )
        .await;
        assert_eq!(
            text,
            "Found 1 package(s) on device emulator-5554 (filtered by 'GOOGLE'):\n\n\
             Showing 1 packages:\ncom.google.android.gms"
        );
        assert!(
            runner
                .calls()
                .contains(&"adb -s emulator-5554 shell pm list packages -u".to_string())
        );
    }
}
