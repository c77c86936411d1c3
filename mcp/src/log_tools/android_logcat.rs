use android_dev_mcp_macros::ToolFn;
use error_stack::Report;
use serde::Deserialize;

use crate::constants::{DEFAULT_LOGCAT_LINES, MAX_LOGCAT_LINES, SHELL_TIMEOUT};
use crate::device::DeviceScope;
use crate::error::{Error, Result};
use crate::tool::{
    DEVICE_SERIAL, DefaultValue, HandlerContext, Page, ParameterName, ParameterSpec,
    ToolResponse, filter_entries, filter_suffix,
};

/// Logcat priorities, lowest first
const LEVELS: &[&str] = &["V", "D", "I", "W", "E", "F"];

/// Prefix of the marker logcat prints before each buffer, e.g. `--------- beginning of main`
const BUFFER_DIVIDER: &str = "--------- beginning of ";

fn is_log_line(line: &&str) -> bool {
    !line.starts_with(BUFFER_DIVIDER)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogcatParams {
    /// Target device
    pub device_serial: Option<String>,
    /// Case-insensitive substring filter on whole lines
    pub filter:        Option<String>,
    /// Minimum priority, one of [`LEVELS`]
    pub level:         String,
    /// Requested line count, capped at [`MAX_LOGCAT_LINES`]
    pub lines:         u64,
    /// Clear the buffer before reading
    pub clear:         bool,
}

#[derive(ToolFn)]
#[tool_fn(params = "LogcatParams")]
pub struct Logcat;

impl Logcat {
    pub const PARAMETERS: &'static [ParameterSpec] = &[
        DEVICE_SERIAL,
        ParameterSpec::string(
            ParameterName::Filter,
            "Only return lines containing this text, e.g. a tag (case-insensitive)",
        ),
        ParameterSpec::one_of(ParameterName::Level, LEVELS, "Minimum log level")
            .with_default(DefaultValue::Str("I")),
        ParameterSpec::integer(
            ParameterName::Lines,
            "Number of recent log lines to retrieve (max: 1000)",
        )
        .with_minimum(1)
        .with_default(DefaultValue::Integer(DEFAULT_LOGCAT_LINES)),
        ParameterSpec::boolean(
            ParameterName::Clear,
            "Clear the log buffer before retrieving",
        ),
    ];
}

async fn handle_impl(ctx: HandlerContext, params: LogcatParams) -> Result<ToolResponse> {
    let lines = params.lines.min(MAX_LOGCAT_LINES);
    let sdk = ctx.sdk();
    let device = sdk
        .target_device(params.device_serial.as_deref(), DeviceScope::Any)
        .await?;

    if params.clear {
        let output = sdk
            .shell(&device.serial, "logcat -c", SHELL_TIMEOUT)
            .await?;
        if !output.success() {
            return Err(Report::new(Error::failed_to(
                format!("clear logcat on device {}", device.serial),
                output.failure_detail(),
            )));
        }
    }

    let command = format!("logcat -d -t {lines} *:{}", params.level);
    let output = sdk.shell(&device.serial, &command, SHELL_TIMEOUT).await?;
    if !output.success() {
        return Err(Report::new(Error::failed_to(
            format!("read logcat on device {}", device.serial),
            output.failure_detail(),
        )));
    }

    let entries: Vec<&str> = output
        .stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if !entries.iter().any(is_log_line) {
        return Ok(ToolResponse::text(format!(
            "No logcat entries found on device {}",
            device.serial
        )));
    }

    let filter = params.filter.as_deref();
    let entries = filter_entries(entries, filter, |line| *line);
    if !entries.iter().any(is_log_line) {
        return Ok(ToolResponse::text(format!(
            "No logcat entries found matching filter '{}' on device {}",
            filter.unwrap_or_default().trim(),
            device.serial
        )));
    }

    // `-t` already bounds the dump; this only guards against devices that ignore it.
    // Buffer dividers are not log lines and do not count towards `lines`.
    let page = Page::last(
        entries,
        usize::try_from(lines).unwrap_or(usize::MAX),
        is_log_line,
    );
    let cleared = if params.clear { " (logs cleared)" } else { "" };
    Ok(ToolResponse::text(format!(
        "Logcat from device {}{}{cleared} (level: {}, lines: {lines}):\n\n{}{}",
        device.serial,
        filter_suffix(filter),
        params.level,
        page.shown.join("\n"),
        page.truncation_note("log lines"),
    )))
}

#[allow(clippy::unwrap_used, reason = "test failures should panic")]
#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::sdk::CommandOutput;
    use crate::sdk::testing::{ONE_EMULATOR, ScriptedRunner};
    use crate::tool::ToolName;
    use crate::tool::testing::invoke;

    const LOG: &str = "--------- beginning of main
10-19 09:00:00.000  1000  1000 I ActivityManager: Start proc
10-19 09:00:01.000  1000  1000 W MyApp: slow frame
10-19 09:00:02.000  1000  1000 E MyApp: crash
";

    #[tokio::test]
    async fn test_lines_above_maximum_are_capped() {
        let runner = ScriptedRunner::new()
            .with_devices(ONE_EMULATOR)
            .on("adb -s emulator-5554 shell logcat -d -t 1000 *:I", CommandOutput::ok(LOG));
        let (text, runner) = invoke(ToolName::AndroidLogcat, json!({ "lines": 5000 }), runner).await;

        assert!(text.starts_with(
            "Logcat from device emulator-5554 (level: I, lines: 1000):\n\n--------- beginning of main"
        ));
        assert!(
            runner
                .calls()
                .contains(&"adb -s emulator-5554 shell logcat -d -t 1000 *:I".to_string())
        );
    }

    #[tokio::test]
    async fn test_buffer_dividers_do_not_use_up_lines() {
        let runner = ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            "adb -s emulator-5554 shell logcat -d -t 2 *:I",
            CommandOutput::ok(
                "--------- beginning of main\nL1 main\n--------- beginning of system\nL2 sys\n",
            ),
        );
        let (text, _) = invoke(ToolName::AndroidLogcat, json!({ "lines": 2 }), runner).await;

        assert_eq!(
            text,
            "Logcat from device emulator-5554 (level: I, lines: 2):\n\n\
             --------- beginning of main\nL1 main\n--------- beginning of system\nL2 sys"
        );
    }

    #[tokio::test]
    async fn test_extra_lines_are_reported() {
        let runner = ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            "adb -s emulator-5554 shell logcat -d -t 2 *:I",
            CommandOutput::ok(LOG),
        );
        let (text, _) = invoke(ToolName::AndroidLogcat, json!({ "lines": 2 }), runner).await;

        assert!(!text.contains("Start proc"));
        assert!(!text.contains("beginning of main"));
        assert!(text.ends_with(
            "E MyApp: crash\n\n... and 1 more log lines. Use filter to narrow results."
        ));
    }

    #[tokio::test]
    async fn test_only_dividers_means_no_entries() {
        let runner = ScriptedRunner::new().with_devices(ONE_EMULATOR).on(
            "adb -s emulator-5554 shell logcat*",
            CommandOutput::ok("--------- beginning of main\n--------- beginning of system\n"),
        );
        let (text, _) = invoke(ToolName::AndroidLogcat, json!({}), runner).await;
        assert_eq!(text, "No logcat entries found on device emulator-5554");
    }

    #[tokio::test]
    async fn test_filter_level_and_clear() {
        let runner = ScriptedRunner::new()
            .with_devices(ONE_EMULATOR)
            .on("adb -s emulator-5554 shell logcat -d -t 20 *:W", CommandOutput::ok(LOG));
        let (text, runner) = invoke(
            ToolName::AndroidLogcat,
            json!({ "filter": "myapp", "level": "w", "lines": 20, "clear": true }),
            runner,
        )
        .await;

        assert_eq!(
            text,
            "Logcat from device emulator-5554 (filtered by 'myapp') (logs cleared) \
             (level: W, lines: 20):\n\n\
             10-19 09:00:01.000  1000  1000 W MyApp: slow frame\n\
             10-19 09:00:02.000  1000  1000 E MyApp: crash"
        );
        let calls = runner.calls();
        let clear = calls.iter().position(|call| call.ends_with("logcat -c")).unwrap();
        let dump = calls.iter().position(|call| call.contains("logcat -d")).unwrap();
        assert!(clear < dump);
    }

    #[tokio::test]
    async fn test_unmatched_filter_names_filter() {
        let runner = ScriptedRunner::new()
            .with_devices(ONE_EMULATOR)
            .on("adb -s emulator-5554 shell logcat*", CommandOutput::ok(LOG));
        let (text, _) = invoke(ToolName::AndroidLogcat, json!({ "filter": "Bluetooth" }), runner).await;
        assert_eq!(
            text,
            "No logcat entries found matching filter 'Bluetooth' on device emulator-5554"
        );
    }

    #[tokio::test]
    async fn test_invalid_level_lists_allowed_values() {
        let (text, runner) = invoke(
            ToolName::AndroidLogcat,
            json!({ "level": "X" }),
            ScriptedRunner::new().with_devices(ONE_EMULATOR),
        )
        .await;
        assert_eq!(
            text,
            "Error: Invalid value 'X' for 'level'. Allowed values: V, D, I, W, E, F"
        );
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_lines_is_rejected() {
        let (text, _) = invoke(
            ToolName::AndroidLogcat,
            json!({ "lines": 0 }),
            ScriptedRunner::new().with_devices(ONE_EMULATOR),
        )
        .await;
        assert_eq!(text, "Error: 'lines' must be at least 1");
    }
}
