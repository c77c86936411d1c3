use std::path::PathBuf;

use chrono::Local;

use super::{CommandOutput, CommandSpec, Sdk};
use crate::config::AndroidTool;
use crate::constants::{EMULATOR_LOG_PREFIX, LIST_TIMEOUT, SDK_PATH_HINT, TRANSFER_TIMEOUT};
use crate::error::Result;

/// One AVD from `avdmanager list avd`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvdDefinition {
    /// AVD name, compared case-insensitively
    pub name:     String,
    /// Target platform, e.g. `Google APIs (Google Inc.)`
    pub target:   Option<String>,
    /// Hardware profile, e.g. `pixel_7 (Google)`
    pub device:   Option<String>,
    /// System image description
    pub based_on: Option<String>,
}

impl AvdDefinition {
    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Lifecycle of an emulator start request as far as this server can observe it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    /// The emulator process was started; the device appears in `adb devices` only once
    /// it has booted, which a later enumeration observes
    Submitted,
}

/// Result of starting an emulator without waiting for boot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorLaunch {
    /// AVD being started
    pub avd_name: String,
    /// Emulator process id
    pub pid:      u32,
    /// File receiving emulator output
    pub log_path: PathBuf,
    /// Always [`LaunchState::Submitted`] when returned
    pub state:    LaunchState,
}

impl Sdk<'_> {
    /// Fresh AVD listing
    pub async fn list_avds(&self) -> Result<Vec<AvdDefinition>> {
        let output = self
            .run_checked(
                CommandSpec::new(AndroidTool::Avdmanager, ["list", "avd"]).with_timeout(LIST_TIMEOUT),
                "list AVDs",
                Some(SDK_PATH_HINT),
            )
            .await?;
        Ok(parse_avd_list(&output.stdout))
    }

    /// `avdmanager create avd`. The custom hardware profile prompt is answered `no`.
    pub async fn create_avd(
        &self,
        name: &str,
        package: &str,
        device: &str,
        force: bool,
    ) -> Result<CommandOutput> {
        let mut args = vec!["create", "avd", "-n", name, "-k", package, "-d", device];
        if force {
            args.push("--force");
        }
        self.run(
            CommandSpec::new(AndroidTool::Avdmanager, args)
                .with_stdin("no\n")
                .with_timeout(TRANSFER_TIMEOUT),
        )
        .await
    }

    /// Start `emulator -avd <name>` detached. Returns as soon as the process exists.
    pub fn start_emulator(
        &self,
        name: &str,
        no_window: bool,
        wipe_data: bool,
    ) -> Result<EmulatorLaunch> {
        let mut args = vec!["-avd", name];
        if no_window {
            args.push("-no-window");
        }
        if wipe_data {
            args.push("-wipe-data");
        }
        let spec = CommandSpec::new(AndroidTool::Emulator, args);

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path =
            std::env::temp_dir().join(format!("{EMULATOR_LOG_PREFIX}_{name}_{timestamp}.log"));

        let process = self.spawn_detached(&spec, &log_path)?;
        tracing::debug!(
            "Emulator for AVD '{name}' started with PID {} (log: {})",
            process.pid,
            process.log_path.display()
        );

        Ok(EmulatorLaunch {
            avd_name: name.to_string(),
            pid:      process.pid,
            log_path: process.log_path,
            state:    LaunchState::Submitted,
        })
    }
}

/// Parse `avdmanager list avd`.
///
/// Entries are separated by dashed lines; the section listing AVDs that could not be
/// loaded is ignored.
pub fn parse_avd_list(output: &str) -> Vec<AvdDefinition> {
    let mut avds = Vec::new();
    let mut current: Option<AvdDefinition> = None;

    for line in output.lines().map(str::trim) {
        if line.starts_with("The following Android Virtual Devices could not be loaded") {
            break;
        }

        if let Some(name) = line.strip_prefix("Name:") {
            avds.extend(current.take());
            current = Some(AvdDefinition {
                name: name.trim().to_string(),
                ..AvdDefinition::default()
            });
            continue;
        }

        let Some(avd) = current.as_mut() else {
            continue;
        };
        let value = |prefix: &str| {
            line.strip_prefix(prefix)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        if let Some(device) = value("Device:") {
            avd.device = Some(device);
        } else if let Some(target) = value("Target:") {
            avd.target = Some(target);
        } else if let Some(based_on) = value("Based on:") {
            avd.based_on = Some(based_on);
        }
    }

    avds.extend(current);
    avds
}
