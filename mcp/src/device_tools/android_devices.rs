use android_dev_mcp_macros::ToolFn;

use crate::constants::NO_DEVICES_GUIDANCE;
use crate::device::Device;
use crate::error::Result;
use crate::tool::{HandlerContext, NoParams, ToolResponse};

#[derive(ToolFn)]
#[tool_fn(params = "NoParams")]
pub struct Devices;

async fn handle_impl(ctx: HandlerContext, _params: NoParams) -> Result<ToolResponse> {
    let devices = ctx.sdk().list_devices().await?;
    if devices.is_empty() {
        return Ok(ToolResponse::text(NO_DEVICES_GUIDANCE));
    }

    let listing = devices
        .iter()
        .enumerate()
        .map(|(index, device)| describe(index + 1, device))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(ToolResponse::text(format!(
        "Found {} Android device(s):\n\n{listing}",
        devices.len()
    )))
}

/// `1. Serial: S, Product: P, Model: M (Emulator)`, omitting unknown properties
fn describe(number: usize, device: &Device) -> String {
    let mut parts = vec![format!("{number}. Serial: {}", device.serial)];
    if let Some(product) = device.product.as_deref() {
        parts.push(format!("Product: {product}"));
    }
    if let Some(model) = device.model.as_deref() {
        parts.push(format!("Model: {model}"));
    }

    let mut line = parts.join(", ");
    if device.is_emulator() {
        line.push_str(" (Emulator)");
    }
    line
}
