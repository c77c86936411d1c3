use std::fmt::Display;

use thiserror::Error;

use crate::constants::NO_DEVICES_GUIDANCE;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";

/// Result type for the `android_dev_mcp` crate
pub type Result<T> = core::result::Result<T, error_stack::Report<Error>>;

/// Every failure a tool can produce.
///
/// The `Display` output of each variant is the exact text returned to the host, so
/// variants carry fully worded messages rather than fragments.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed argument
    #[error("Error: {0}")]
    Validation(String),

    /// A device, AVD, package or file that the caller named does not exist
    #[error("Error: {0}")]
    NotFound(String),

    /// The bridge reported no devices at all
    #[error("{}", NO_DEVICES_GUIDANCE)]
    NoDevices,

    /// Devices exist but none of them can be targeted
    #[error("Error: {0}")]
    DeviceUnavailable(String),

    /// An external process exited non-zero, could not be spawned, timed out or was cancelled
    #[error("{message}{}", format_hint(*.hint))]
    ExternalToolFailure {
        /// Complete failure text, including captured stderr
        message: String,
        /// Optional remediation hint appended after a blank line
        hint:    Option<&'static str>,
    },

    /// A deliberately disabled action
    #[error("{0}")]
    Unsupported(String),

    /// Local IO or serialization fault
    #[error("Error: {0}")]
    Internal(String),
}

impl Error {
    // Builder methods for common patterns

    /// Create a "'key' parameter is required" error
    pub fn missing(key: &str) -> Self {
        Self::Validation(format!("'{key}' parameter is required"))
    }

    /// Create a "key cannot be empty" error
    pub fn empty(key: &str) -> Self {
        Self::Validation(format!("{key} cannot be empty"))
    }

    /// Create an error for a value that has the wrong type
    pub fn invalid_type(key: &str, expected: &str) -> Self {
        Self::Validation(format!("'{key}' must be {expected}"))
    }

    /// Create an error for a value that is not in the allowed set
    pub fn invalid_value(key: &str, value: impl Display, allowed: &[&str]) -> Self {
        Self::Validation(format!(
            "Invalid value '{value}' for '{key}'. Allowed values: {}",
            allowed.join(", ")
        ))
    }

    /// Create a "Failed to X: details" external failure
    pub fn failed_to(action: impl Display, details: impl Display) -> Self {
        Self::ExternalToolFailure {
            message: format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"),
            hint:    None,
        }
    }

    /// Create an external failure carrying a remediation hint
    pub fn external(message: impl Into<String>, hint: &'static str) -> Self {
        Self::ExternalToolFailure {
            message: message.into(),
            hint:    Some(hint),
        }
    }

    /// Create error for IO operations
    pub fn io_failed(operation: &str, path: &std::path::Path, error: impl Display) -> Self {
        Self::Internal(format!(
            "{MSG_FAILED_TO_PREFIX} {operation} {}: {error}",
            path.display()
        ))
    }

    /// Create error for process operations
    pub fn process_failed(operation: &str, process: &str, error: impl Display) -> Self {
        Self::ExternalToolFailure {
            message: format!("{MSG_FAILED_TO_PREFIX} {operation} process '{process}': {error}"),
            hint:    Some(crate::constants::SDK_PATH_HINT),
        }
    }
}

fn format_hint(hint: Option<&'static str>) -> String {
    hint.map(|hint| format!("\n\n{hint}")).unwrap_or_default()
}

// Note: there is no From<Error> for McpError. Every error is rendered as the text of a
// successful tool result so nothing escapes a tool handler.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            Error::missing("command").to_string(),
            "Error: 'command' parameter is required"
        );
        assert_eq!(
            Error::empty("command").to_string(),
            "Error: command cannot be empty"
        );
        assert_eq!(
            Error::invalid_value("level", "X", &["V", "D"]).to_string(),
            "Error: Invalid value 'X' for 'level'. Allowed values: V, D"
        );
    }

    #[test]
    fn test_external_failure_appends_hint() {
        let error = Error::external("Failed to list AVDs: boom", "check PATH");
        assert_eq!(error.to_string(), "Failed to list AVDs: boom\n\ncheck PATH");

        let error = Error::failed_to("push file", "denied");
        assert_eq!(error.to_string(), "Failed to push file: denied");
    }

    #[test]
    fn test_no_devices_is_guidance() {
        let text = Error::NoDevices.to_string();
        assert!(text.contains("USB debugging"));
        assert!(text.contains("Android SDK"));
    }
}
