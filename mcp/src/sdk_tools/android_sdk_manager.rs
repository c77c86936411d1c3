use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;
use strum::{Display, VariantNames};

use crate::constants::{MAX_SDK_ENTRIES_DISPLAYED, SDK_UNINSTALL_UNSUPPORTED};
use crate::error::{Error, Result};
use crate::tool::{
    HandlerContext, Page, ParameterName, ParameterSpec, ToolResponse, filter_entries,
};

/// What `android-sdk-manager` should do
#[derive(Clone, Copy, Debug, Deserialize, Display, PartialEq, Eq, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SdkAction {
    /// `sdkmanager --list`
    List,
    /// `sdkmanager <package>`
    Install,
    /// `sdkmanager --update`
    Update,
    /// Refused without running anything
    Uninstall,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkManagerParams {
    /// Action to perform
    pub action:           SdkAction,
    /// Package for `install`
    pub package:          Option<String>,
    /// Case-insensitive filter for `list`
    pub filter:           Option<String>,
    /// Add `--include_obsolete` to `list`
    pub include_obsolete: bool,
    /// Answer license prompts with `y`
    pub accept_licenses:  bool,
}

#[derive(Deserialize)]
struct ActionOnly {
    action: SdkAction,
}

const ACTION: ParameterSpec =
    ParameterSpec::one_of(ParameterName::Action, SdkAction::VARIANTS, "Action to perform")
        .required();

#[derive(ToolFn)]
#[tool_fn(params = "SdkManagerParams", preflight = "refuse_uninstall")]
pub struct SdkManager;

impl SdkManager {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ACTION,
        ParameterSpec::string(
            ParameterName::Package,
            "SDK package to install, e.g. platform-tools or platforms;android-34",
        ),
        ParameterSpec::string(
            ParameterName::Filter,
            "Only list entries containing this text (case-insensitive, list action only)",
        ),
        ParameterSpec::boolean(
            ParameterName::IncludeObsolete,
            "Include obsolete packages in the list",
        ),
        ParameterSpec::boolean(
            ParameterName::AcceptLicenses,
            "Automatically accept SDK licenses",
        ),
    ];
}

/// `uninstall` is refused whatever else is passed, so only `action` is looked at
fn refuse_uninstall(ctx: &HandlerContext) -> Option<Result<ToolResponse>> {
    let ActionOnly { action } = ctx.extract_parameter_subset::<ActionOnly>(&[ACTION]).ok()?;
    (action == SdkAction::Uninstall).then(uninstall_unsupported)
}

fn uninstall_unsupported() -> Result<ToolResponse> {
    Err(Report::new(Error::Unsupported(
        SDK_UNINSTALL_UNSUPPORTED.to_string(),
    )))
}

async fn handle_impl(ctx: HandlerContext, params: SdkManagerParams) -> Result<ToolResponse> {
    tracing::debug!("SDK manager action: {}", params.action);
    match params.action {
        SdkAction::List => list(&ctx, &params).await,
        SdkAction::Install => {
            let package = params
                .package
                .as_deref()
                .map(str::trim)
                .filter(|package| !package.is_empty())
                .ok_or_else(|| {
                    Report::new(Error::Validation(
                        "'package' parameter is required for install action".to_string(),
                    ))
                })?;
            ctx.sdk().sdk_install(package, params.accept_licenses).await?;
            Ok(ToolResponse::text(format!(
                "Successfully installed SDK package '{package}'"
            )))
        }
        SdkAction::Update => {
            ctx.sdk().sdk_update(params.accept_licenses).await?;
            Ok(ToolResponse::text("Successfully updated SDK packages"))
        }
        SdkAction::Uninstall => uninstall_unsupported(),
    }
}

async fn list(ctx: &HandlerContext, params: &SdkManagerParams) -> Result<ToolResponse> {
    let entries = ctx.sdk().sdk_list(params.include_obsolete).await?;
    let filter = params.filter.as_deref();
    let entries = filter_entries(entries, filter, String::as_str);

    if entries.is_empty() {
        let text = match filter.map(str::trim).filter(|filter| !filter.is_empty()) {
            Some(filter) => format!("No SDK packages found matching filter '{filter}'"),
            None => "No SDK packages found".to_string(),
        };
        return Ok(ToolResponse::text(text));
    }

    let page = Page::first(entries, MAX_SDK_ENTRIES_DISPLAYED);
    Ok(ToolResponse::text(format!(
        "SDK packages (showing first {} entries):\n\n{}{}",
        page.shown.len(),
        page.shown.join("\n"),
        page.truncation_note("entries")
    )))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::constants::{LICENSE_ACCEPT_RESPONSES, SDK_UNINSTALL_UNSUPPORTED};
    use crate::sdk::CommandOutput;
    use crate::sdk::testing::ScriptedRunner;
    use crate::tool::ToolName;
    use crate::tool::testing::invoke;

    const SDK_LIST: &str = "Installed packages:
  Path                 | Version | Description                    | Location
  -------              | ------- | -------                        | -------
  platform-tools       | 35.0.1  | Android SDK Platform-Tools     | platform-tools
  platforms;android-34 | 3       | Android SDK Platform 34        | platforms/android-34

Available Packages:
  build-tools;34.0.0   | 34.0.0  | Android SDK Build-Tools 34     | build-tools/34.0.0
";

    fn sdk_list(output: &str) -> ScriptedRunner {
        ScriptedRunner::new().on("sdkmanager --list", CommandOutput::ok(output))
    }

    #[tokio::test]
    async fn test_list_keeps_non_blank_lines() {
        let (text, _) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "list" }),
            sdk_list(SDK_LIST),
        )
        .await;

        assert!(text.starts_with("SDK packages (showing first 7 entries):\n\nInstalled packages:"));
        assert_eq!(text.lines().filter(|line| line.trim().is_empty()).count(), 1);
        assert!(text.ends_with("build-tools/34.0.0"));
    }

    #[tokio::test]
    async fn test_list_filter() {
        let (text, _) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "LIST", "filter": "Platform-Tools" }),
            sdk_list(SDK_LIST),
        )
        .await;
        assert!(text.ends_with(
            "\n\n  platform-tools       | 35.0.1  | Android SDK Platform-Tools     | platform-tools"
        ));

        let (text, _) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "list", "filter": "ndk" }),
            sdk_list(SDK_LIST),
        )
        .await;
        assert_eq!(text, "No SDK packages found matching filter 'ndk'");
    }

    #[tokio::test]
    async fn test_list_is_capped() {
        let output = (0..80)
            .map(|index| format!("system-images;android-{index};default;x86_64"))
            .collect::<Vec<_>>()
            .join("\n");
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "list", "includeObsolete": true }),
            ScriptedRunner::new().on("sdkmanager --list *", CommandOutput::ok(output)),
        )
        .await;

        assert_eq!(runner.calls(), vec!["sdkmanager --list --include_obsolete"]);
        assert!(text.starts_with("SDK packages (showing first 50 entries):"));
        assert!(text.contains("android-49;"));
        assert!(!text.contains("android-50;"));
        assert!(text.ends_with("... and 30 more entries. Use filter to narrow results."));
    }

    #[tokio::test]
    async fn test_install_requires_package() {
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "install", "package": "  " }),
            ScriptedRunner::new(),
        )
        .await;
        assert_eq!(
            text,
            "Error: 'package' parameter is required for install action"
        );
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_install_with_licenses() {
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "install", "package": "platform-tools", "acceptLicenses": true }),
            ScriptedRunner::new(),
        )
        .await;

        assert_eq!(text, "Successfully installed SDK package 'platform-tools'");
        let specs = runner.call_specs();
        assert_eq!(specs[0].command_line(), "sdkmanager platform-tools");
        assert_eq!(
            specs[0].stdin.as_deref().map(|stdin| stdin.lines().count()),
            Some(LICENSE_ACCEPT_RESPONSES)
        );
    }

    #[tokio::test]
    async fn test_install_failure_carries_stderr() {
        let runner = ScriptedRunner::new().on(
            "sdkmanager platforms;android-99",
            CommandOutput::failed(1, "Warning: Failed to find package 'platforms;android-99'"),
        );
        let (text, _) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "install", "package": "platforms;android-99" }),
            runner,
        )
        .await;

        assert!(text.starts_with(
            "Failed to install SDK package 'platforms;android-99': Warning: Failed to find \
             package 'platforms;android-99'"
        ));
    }

    #[tokio::test]
    async fn test_update() {
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "update" }),
            ScriptedRunner::new(),
        )
        .await;
        assert_eq!(text, "Successfully updated SDK packages");
        assert_eq!(runner.calls(), vec!["sdkmanager --update"]);
    }

    #[tokio::test]
    async fn test_uninstall_is_refused_without_running_anything() {
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "uninstall", "package": "platform-tools" }),
            ScriptedRunner::new(),
        )
        .await;
        assert_eq!(text, SDK_UNINSTALL_UNSUPPORTED);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_uninstall_is_refused_whatever_else_is_passed() {
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "Uninstall", "acceptLicenses": "maybe", "includeObsolete": "x" }),
            ScriptedRunner::new(),
        )
        .await;
        assert_eq!(text, SDK_UNINSTALL_UNSUPPORTED);
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_flags_still_rejected_for_other_actions() {
        let (text, runner) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "update", "acceptLicenses": "maybe" }),
            ScriptedRunner::new(),
        )
        .await;
        assert_eq!(text, "Error: 'acceptLicenses' must be a boolean");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let (text, _) = invoke(
            ToolName::AndroidSdkManager,
            json!({ "action": "purge" }),
            ScriptedRunner::new(),
        )
        .await;
        assert_eq!(
            text,
            "Error: Invalid value 'purge' for 'action'. Allowed values: list, install, update, \
             uninstall"
        );
    }
}
