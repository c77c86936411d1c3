use android_dev_mcp_macros::ToolFn;

use crate::error::Result;
use crate::tool::{HandlerContext, NoParams, ToolResponse};

#[derive(ToolFn)]
#[tool_fn(params = "NoParams")]
pub struct DevicesList;

async fn handle_impl(ctx: HandlerContext, _params: NoParams) -> Result<ToolResponse> {
    let devices = ctx.sdk().list_devices().await?;

    let mut lines = vec!["Connected Android Devices:".to_string()];
    if devices.is_empty() {
        lines.push("No devices connected.".to_string());
    }
    lines.extend(devices.iter().map(|device| {
        format!(
            "- {} ({}) - {}",
            device.serial,
            device.state,
            device.model.as_deref().unwrap_or("Unknown Model")
        )
    }));

    Ok(ToolResponse::text(lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::sdk::testing::{NO_DEVICES, ScriptedRunner};
    use crate::tool::ToolName;
    use crate::tool::testing::invoke;

    #[tokio::test]
    async fn test_compact_listing_shows_state() {
        let devices = "List of devices attached
emulator-5554          device product:sdk_gphone64 model:Pixel_7
0123456789ABCDEF       unauthorized usb:1-1 transport_id:3
";
        let (text, _) = invoke(
            ToolName::AndroidDevicesList,
            json!({}),
            ScriptedRunner::new().with_devices(devices),
        )
        .await;

        assert_eq!(
            text,
            "Connected Android Devices:\n\
             - emulator-5554 (device) - Pixel_7\n\
             - 0123456789ABCDEF (unauthorized) - Unknown Model"
        );
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let (text, _) = invoke(
            ToolName::AndroidDevicesList,
            json!({}),
            ScriptedRunner::new().with_devices(NO_DEVICES),
        )
        .await;
        assert_eq!(text, "Connected Android Devices:\nNo devices connected.");
    }
}
