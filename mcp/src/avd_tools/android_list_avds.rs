use android_dev_mcp_macros::ToolFn;

use crate::constants::NO_AVDS_GUIDANCE;
use crate::error::Result;
use crate::sdk::AvdDefinition;
use crate::tool::{HandlerContext, NoParams, ToolResponse};

#[derive(ToolFn)]
#[tool_fn(params = "NoParams")]
pub struct ListAvds;

async fn handle_impl(ctx: HandlerContext, _params: NoParams) -> Result<ToolResponse> {
    let avds = ctx.sdk().list_avds().await?;
    if avds.is_empty() {
        return Ok(ToolResponse::text(NO_AVDS_GUIDANCE));
    }

    let listing = avds
        .iter()
        .enumerate()
        .map(|(index, avd)| describe(index + 1, avd))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(ToolResponse::text(format!(
        "Found {} Android Virtual Device(s):\n\n{listing}",
        avds.len()
    )))
}

fn describe(number: usize, avd: &AvdDefinition) -> String {
    let mut parts = vec![format!("{number}. Name: {}", avd.name)];
    let properties = [
        ("Target", &avd.target),
        ("Device", &avd.device),
        ("Based on", &avd.based_on),
    ];
    for (label, value) in properties {
        if let Some(value) = value {
            parts.push(format!("{label}: {value}"));
        }
    }
    parts.join(", ")
}
