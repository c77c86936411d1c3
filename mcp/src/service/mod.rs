mod mcp_service;

pub use mcp_service::McpService;
