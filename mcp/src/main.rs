//! # Android Dev MCP Server
//!
//! A Model Context Protocol server that exposes Android development tooling to AI
//! assistants: device discovery and shell access through `adb`, app install and launch,
//! logcat, file transfer, emulator (AVD) management and SDK package management.
//!
//! Every tool shells out to the Android SDK binaries and returns a single text block.
//! Failures are reported as text too, so a tool call never fails at the protocol level.

use rmcp::ServiceExt;
use rmcp::transport::stdio;

use crate::config::ServerConfig;
use crate::sdk::SdkEnvironment;
use crate::service::McpService;
use crate::support::{get_current_tracing_level, get_trace_log_path, init_file_tracing};

mod app_tools;
mod avd_tools;
mod config;
mod constants;
mod device;
mod device_tools;
mod error;
mod file_tools;
mod log_tools;
mod sdk;
mod sdk_tools;
mod service;
mod support;
mod tool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    // File based; stdout carries the MCP transport
    let _guard = init_file_tracing(config.log_level);
    tracing::info!(
        "Starting android_dev_mcp {} (tracing at {} to {})",
        env!("CARGO_PKG_VERSION"),
        get_current_tracing_level().as_str(),
        get_trace_log_path().display()
    );
    config.log_summary();

    let service = McpService::new(SdkEnvironment::from_config(&config));

    let server = service.serve(stdio()).await?;
    server.waiting().await?;

    tracing::info!("Client disconnected, shutting down");
    Ok(())
}
