use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::constants::DEFAULT_AVD_DEVICE;
use crate::error::{Error, Result};
use crate::tool::{DefaultValue, HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvdParams {
    /// New AVD name
    pub name:    String,
    /// System image package
    pub package: String,
    /// Hardware profile
    pub device:  String,
    /// Replace an AVD with the same name
    pub force:   bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "CreateAvdParams")]
pub struct CreateAvd;

impl CreateAvd {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(ParameterName::Name, "Name for the new AVD")
            .required()
            .non_empty(),
        ParameterSpec::string(
            ParameterName::Package,
            "System image package, e.g. system-images;android-34;google_apis;x86_64",
        )
        .required()
        .non_empty(),
        ParameterSpec::string(
            ParameterName::Device,
            "Hardware profile, e.g. pixel, pixel_7, Nexus 5X",
        )
        .with_default(DefaultValue::Str(DEFAULT_AVD_DEVICE)),
        ParameterSpec::boolean(
            ParameterName::Force,
            "Overwrite an existing AVD with the same name",
        ),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: CreateAvdParams) -> Result<ToolResponse> {
    let name = params.name.trim();
    let sdk = ctx.sdk();

    let exists = sdk.list_avds().await?.iter().any(|avd| avd.is_named(name));
    if exists && !params.force {
        return Err(Report::new(Error::Validation(format!(
            "AVD '{name}' already exists. Use force=true to overwrite."
        ))));
    }

    let output = sdk
        .create_avd(name, &params.package, &params.device, params.force)
        .await?;
    if !output.success() {
        return Err(Report::new(Error::failed_to(
            format!("create AVD '{name}'"),
            output.failure_detail(),
        ))
        .attach(format!("package: {}, device: {}", params.package, params.device)));
    }

    tracing::info!("Created AVD '{name}'{}", if exists { " (replaced)" } else { "" });
    Ok(ToolResponse::text(format!(
        "Successfully created AVD '{name}' with package '{}' and device '{}'",
        params.package, params.device
    )))
}
