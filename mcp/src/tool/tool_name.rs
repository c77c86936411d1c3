//! Tool names and descriptions for the Android MCP server.
//!
//! This module is the single source of truth for every tool the server exposes: its wire
//! name, help text, annotations, parameters and handler.

use std::sync::Arc;

use android_dev_mcp_macros::ToolDescription;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::annotations::{Annotation, DomainOfInteraction, EnvironmentImpact, ToolCategory};
use super::parameters::ParameterSpec;
use super::tool_def::ToolDef;
use super::types::ErasedToolFn;
use crate::app_tools::{InstallApk, LaunchApp, ListPackages, UninstallApp};
use crate::avd_tools::{CreateAvd, ListAvds, StartAvd, StopAvd};
use crate::device_tools::{Devices, DevicesList, Shell};
use crate::file_tools::{PullFile, PushFile};
use crate::log_tools::Logcat;
use crate::sdk_tools::SdkManager;

/// Tool names enum with automatic `kebab-case` serialization
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    ToolDescription,
)]
#[strum(serialize_all = "kebab-case")]
#[tool_description(path = "../../help_text")]
pub enum ToolName {
    // Devices
    /// `android-devices` - Numbered list of connected devices
    AndroidDevices,
    /// `android-devices-list` - Compact `serial (state) - model` list
    AndroidDevicesList,
    /// `android-shell` - Run a shell command on a device
    AndroidShell,

    // Apps
    /// `android-install-apk` - Install a local APK
    AndroidInstallApk,
    /// `android-uninstall-app` - Uninstall a package
    AndroidUninstallApp,
    /// `android-launch-app` - Launch a package or activity
    AndroidLaunchApp,
    /// `android-list-packages` - List installed packages
    AndroidListPackages,

    // Logs
    /// `android-logcat` - Dump logcat
    AndroidLogcat,

    // Files
    /// `android-push-file` - Copy a local file to a device
    AndroidPushFile,
    /// `android-pull-file` - Copy a device file to the local file system
    AndroidPullFile,

    // Emulators
    /// `android-list-avds` - List AVD definitions
    AndroidListAvds,
    /// `android-create-avd` - Create an AVD
    AndroidCreateAvd,
    /// `android-start-avd` - Start an emulator in the background
    AndroidStartAvd,
    /// `android-stop-avd` - Stop a running emulator
    AndroidStopAvd,

    // SDK
    /// `android-sdk-manager` - List, install and update SDK packages
    AndroidSdkManager,
}

impl ToolName {
    /// Get enhanced annotations for this tool
    pub fn get_annotations(self) -> Annotation {
        match self {
            Self::AndroidDevices => Annotation::new(
                "List Devices",
                ToolCategory::Device,
                EnvironmentImpact::ReadOnly,
            ),
            Self::AndroidDevicesList => Annotation::new(
                "List Devices (Compact)",
                ToolCategory::Device,
                EnvironmentImpact::ReadOnly,
            ),
            Self::AndroidShell => Annotation::new(
                "Run Shell Command",
                ToolCategory::Device,
                EnvironmentImpact::DestructiveNonIdempotent,
            ),
            Self::AndroidInstallApk => Annotation::new(
                "Install APK",
                ToolCategory::App,
                EnvironmentImpact::AdditiveIdempotent,
            ),
            Self::AndroidUninstallApp => Annotation::new(
                "Uninstall App",
                ToolCategory::App,
                EnvironmentImpact::DestructiveIdempotent,
            ),
            Self::AndroidLaunchApp => Annotation::new(
                "Launch App",
                ToolCategory::App,
                EnvironmentImpact::AdditiveNonIdempotent,
            ),
            Self::AndroidListPackages => Annotation::new(
                "List Packages",
                ToolCategory::App,
                EnvironmentImpact::ReadOnly,
            ),
            // `clear` empties the device log buffer
            Self::AndroidLogcat => Annotation::new(
                "Read Logcat",
                ToolCategory::Logging,
                EnvironmentImpact::DestructiveIdempotent,
            ),
            Self::AndroidPushFile => Annotation::new(
                "Push File",
                ToolCategory::File,
                EnvironmentImpact::AdditiveIdempotent,
            ),
            Self::AndroidPullFile => Annotation::new(
                "Pull File",
                ToolCategory::File,
                EnvironmentImpact::AdditiveIdempotent,
            ),
            Self::AndroidListAvds => Annotation::new(
                "List AVDs",
                ToolCategory::Emulator,
                EnvironmentImpact::ReadOnly,
            ),
            Self::AndroidCreateAvd => Annotation::new(
                "Create AVD",
                ToolCategory::Emulator,
                EnvironmentImpact::AdditiveNonIdempotent,
            ),
            Self::AndroidStartAvd => Annotation::new(
                "Start AVD",
                ToolCategory::Emulator,
                EnvironmentImpact::AdditiveNonIdempotent,
            ),
            Self::AndroidStopAvd => Annotation::new(
                "Stop AVD",
                ToolCategory::Emulator,
                EnvironmentImpact::DestructiveIdempotent,
            ),
            Self::AndroidSdkManager => Annotation::new(
                "SDK Manager",
                ToolCategory::Sdk,
                EnvironmentImpact::DestructiveNonIdempotent,
            )
            .with_domain(DomainOfInteraction::OpenWorld),
        }
    }

    /// Input contract for this tool
    pub const fn get_parameters(self) -> &'static [ParameterSpec] {
        match self {
            Self::AndroidDevices | Self::AndroidDevicesList | Self::AndroidListAvds => &[],
            Self::AndroidShell => Shell::PARAMETERS,
            Self::AndroidInstallApk => InstallApk::PARAMETERS,
            Self::AndroidUninstallApp => UninstallApp::PARAMETERS,
            Self::AndroidLaunchApp => LaunchApp::PARAMETERS,
            Self::AndroidListPackages => ListPackages::PARAMETERS,
            Self::AndroidLogcat => Logcat::PARAMETERS,
            Self::AndroidPushFile => PushFile::PARAMETERS,
            Self::AndroidPullFile => PullFile::PARAMETERS,
            Self::AndroidCreateAvd => CreateAvd::PARAMETERS,
            Self::AndroidStartAvd => StartAvd::PARAMETERS,
            Self::AndroidStopAvd => StopAvd::PARAMETERS,
            Self::AndroidSdkManager => SdkManager::PARAMETERS,
        }
    }

    /// Create handler instance for this tool
    pub fn create_handler(self) -> Arc<dyn ErasedToolFn> {
        match self {
            Self::AndroidDevices => Arc::new(Devices),
            Self::AndroidDevicesList => Arc::new(DevicesList),
            Self::AndroidShell => Arc::new(Shell),
            Self::AndroidInstallApk => Arc::new(InstallApk),
            Self::AndroidUninstallApp => Arc::new(UninstallApp),
            Self::AndroidLaunchApp => Arc::new(LaunchApp),
            Self::AndroidListPackages => Arc::new(ListPackages),
            Self::AndroidLogcat => Arc::new(Logcat),
            Self::AndroidPushFile => Arc::new(PushFile),
            Self::AndroidPullFile => Arc::new(PullFile),
            Self::AndroidListAvds => Arc::new(ListAvds),
            Self::AndroidCreateAvd => Arc::new(CreateAvd),
            Self::AndroidStartAvd => Arc::new(StartAvd),
            Self::AndroidStopAvd => Arc::new(StopAvd),
            Self::AndroidSdkManager => Arc::new(SdkManager),
        }
    }

    /// Convert this tool name to a complete `ToolDef`
    pub fn to_tool_def(self) -> ToolDef {
        ToolDef {
            tool_name:   self,
            annotations: self.get_annotations(),
            handler:     self.create_handler(),
            parameters:  self.get_parameters(),
        }
    }
}

/// Get all tool definitions for registration with the MCP service
pub fn get_all_tool_definitions() -> Vec<ToolDef> {
    ToolName::iter().map(ToolName::to_tool_def).collect()
}
