//! Constants for tool limits, timeouts, external tool names and user guidance
use std::time::Duration;

// ============================================================================
// LISTING LIMITS
// ============================================================================

/// Maximum packages shown by `android-list-packages`
pub const MAX_PACKAGES_DISPLAYED: usize = 50;

/// Maximum entries shown by `android-sdk-manager` list
pub const MAX_SDK_ENTRIES_DISPLAYED: usize = 50;

/// Default logcat lines when `lines` is omitted
pub const DEFAULT_LOGCAT_LINES: i64 = 100;

/// Upper bound for logcat `lines`; larger requests are capped
pub const MAX_LOGCAT_LINES: u64 = 1000;

// ============================================================================
// EXTERNAL TOOLS
// ============================================================================

/// Bridge binary name
pub const ADB: &str = "adb";

/// Emulator binary name
pub const EMULATOR: &str = "emulator";

/// AVD manager binary name
pub const AVDMANAGER: &str = "avdmanager";

/// SDK manager binary name
pub const SDKMANAGER: &str = "sdkmanager";

/// Bridge location used when neither PATH nor the SDK root provide one
pub const FALLBACK_ADB_PATH: &str = "/usr/bin/adb";

/// Serial prefix the bridge uses for emulator instances
pub const EMULATOR_SERIAL_PREFIX: &str = "emulator-";

/// Hardware profile used by `android-create-avd` when `device` is omitted
pub const DEFAULT_AVD_DEVICE: &str = "pixel";

/// Number of "y" answers fed to `sdkmanager` license prompts
pub const LICENSE_ACCEPT_RESPONSES: usize = 10;

/// Intent category used to launch an app without naming an activity
pub const LAUNCHER_CATEGORY: &str = "android.intent.category.LAUNCHER";

// ============================================================================
// TIMEOUTS
// ============================================================================

/// Device enumeration, package and AVD listing
pub const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shell commands, logcat, launch and uninstall
pub const SHELL_TIMEOUT: Duration = Duration::from_secs(60);

/// APK install, file transfer and AVD creation
pub const TRANSFER_TIMEOUT: Duration = Duration::from_secs(300);

/// SDK package install and update
pub const SDK_INSTALL_TIMEOUT: Duration = Duration::from_secs(1800);

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Environment variable holding the initial tracing level
pub const LOG_LEVEL_ENV: &str = "ANDROID_DEV_MCP_LOG_LEVEL";

/// Environment variables checked, in order, for the SDK root
pub const SDK_ROOT_ENV_VARS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// Trace log file written to the temp directory
pub const TRACE_LOG_FILENAME: &str = "android_dev_mcp_trace.log";

/// Prefix of emulator output logs written to the temp directory
pub const EMULATOR_LOG_PREFIX: &str = "android_dev_mcp_emulator";

// ============================================================================
// USER GUIDANCE
// ============================================================================

/// Returned when the bridge enumerates no devices
pub const NO_DEVICES_GUIDANCE: &str = "No Android devices found. Make sure:
- Android SDK is installed
- ADB is in your PATH (or ANDROID_HOME is set)
- USB debugging is enabled on your device
- Device is connected via USB or network, or an emulator is running";

/// Appended when an SDK binary could not be run at all
pub const SDK_PATH_HINT: &str =
    "Ensure the Android SDK tools are installed and on PATH (or set ANDROID_HOME).";

/// Returned for the deliberately unsupported SDK uninstall action
pub const SDK_UNINSTALL_UNSUPPORTED: &str =
    "Uninstall action is not supported. Use Android Studio or manually delete SDK components.";

/// Returned by `android-list-avds` when no AVD exists
pub const NO_AVDS_GUIDANCE: &str = "No Android Virtual Devices (AVDs) found. You can create AVDs using:
- Android Studio AVD Manager
- The android-create-avd tool
- Command line: avdmanager create avd -n <name> -k <systemImage>";
