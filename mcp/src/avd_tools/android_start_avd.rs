use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::tool::{HandlerContext, ParameterName, ParameterSpec, ToolResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAvdParams {
    /// AVD to start, matched case-insensitively
    pub name:      String,
    /// Run without a window
    pub no_window: bool,
    /// Start from a factory reset
    pub wipe_data: bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "StartAvdParams")]
pub struct StartAvd;

impl StartAvd {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        ParameterSpec::string(ParameterName::Name, "Name of the AVD to start (see android-list-avds)")
            .required()
            .non_empty(),
        ParameterSpec::boolean(ParameterName::NoWindow, "Start headless, without a window"),
        ParameterSpec::boolean(ParameterName::WipeData, "Wipe user data before starting"),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: StartAvdParams) -> Result<ToolResponse> {
    let requested = params.name.trim();
    let sdk = ctx.sdk();

    let avds = sdk.list_avds().await?;
    let Some(avd) = avds.iter().find(|avd| avd.is_named(requested)) else {
        return Err(Report::new(Error::NotFound(format!(
            "AVD '{requested}' not found. Use android-list-avds to see available AVDs."
        ))));
    };

    let launch = sdk.start_emulator(&avd.name, params.no_window, params.wipe_data)?;
    tracing::info!(
        "AVD '{}' launch {:?} with PID {}",
        launch.avd_name,
        launch.state,
        launch.pid
    );

    let mut options = Vec::new();
    if params.no_window {
        options.push("headless mode");
    }
    if params.wipe_data {
        options.push("wiped data");
    }
    let options = if options.is_empty() {
        String::new()
    } else {
        format!(" ({})", options.join(", "))
    };

    Ok(ToolResponse::text(format!(
        "Successfully started AVD '{}'{options}. It may take a few moments to fully boot; \
         use android-devices to check when it is online.\n\nEmulator PID: {}\nEmulator log: {}",
        launch.avd_name,
        launch.pid,
        launch.log_path.display()
    )))
}
