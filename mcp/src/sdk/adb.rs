use std::path::Path;
use std::time::Duration;

use super::{CommandOutput, CommandSpec, Sdk};
use crate::config::AndroidTool;
use crate::constants::{LIST_TIMEOUT, SDK_PATH_HINT, SHELL_TIMEOUT, TRANSFER_TIMEOUT};
use crate::device::{Device, DeviceScope, SelectionPolicy, parse_device_list, resolve_device};
use crate::error::Result;

fn adb<I, S>(args: I) -> CommandSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandSpec::new(AndroidTool::Adb, args)
}

fn on_device(serial: &str, args: &[&str]) -> CommandSpec {
    adb(["-s", serial].iter().chain(args).copied())
}

impl Sdk<'_> {
    /// Start the bridge daemon. Idempotent.
    pub async fn start_server(&self) -> Result<()> {
        self.run_checked(
            adb(["start-server"]).with_timeout(LIST_TIMEOUT),
            "start the ADB server",
            Some(SDK_PATH_HINT),
        )
        .await?;
        Ok(())
    }

    /// Fresh device enumeration in bridge order
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.start_server().await?;
        let output = self
            .run_checked(
                adb(["devices", "-l"]).with_timeout(LIST_TIMEOUT),
                "list Android devices",
                Some(SDK_PATH_HINT),
            )
            .await?;
        Ok(parse_device_list(&output.stdout))
    }

    /// Enumerate devices and pick the target. A blank serial counts as none.
    pub async fn target_device(&self, serial: Option<&str>, scope: DeviceScope) -> Result<Device> {
        let serial = serial.map(str::trim).filter(|serial| !serial.is_empty());
        let devices = self.list_devices().await?;
        let device = resolve_device(&devices, serial, scope, SelectionPolicy::default())?;
        tracing::debug!("Targeting device {} ({})", device.serial, device.state);
        Ok(device)
    }

    /// Run `command` through the device shell. The device shell interprets the string.
    pub async fn shell(
        &self,
        serial: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<CommandOutput> {
        self.run(on_device(serial, &["shell", command]).with_timeout(timeout))
            .await
    }

    /// Installed package names, sorted as `pm` prints them
    pub async fn list_packages(&self, serial: &str, include_uninstalled: bool) -> Result<Vec<String>> {
        let command = if include_uninstalled {
            "pm list packages -u"
        } else {
            "pm list packages"
        };
        let output = self
            .run_checked(
                on_device(serial, &["shell", command]).with_timeout(LIST_TIMEOUT),
                &format!("list packages on device {serial}"),
                None,
            )
            .await?;
        Ok(parse_package_list(&output.stdout))
    }

    /// True when `package` is in a fresh package list
    pub async fn is_package_installed(&self, serial: &str, package: &str) -> Result<bool> {
        Ok(self
            .list_packages(serial, false)
            .await?
            .iter()
            .any(|installed| installed == package))
    }

    /// `adb install [-r] <apk>`
    pub async fn install(&self, serial: &str, apk: &Path, reinstall: bool) -> Result<CommandOutput> {
        let apk = apk.to_string_lossy();
        let mut args = vec!["install"];
        if reinstall {
            args.push("-r");
        }
        args.push(&*apk);
        self.run(on_device(serial, &args).with_timeout(TRANSFER_TIMEOUT))
            .await
    }

    /// `adb push <local> <remote>`
    pub async fn push(&self, serial: &str, local: &Path, remote: &str) -> Result<CommandOutput> {
        let local = local.to_string_lossy();
        self.run(on_device(serial, &["push", &*local, remote]).with_timeout(TRANSFER_TIMEOUT))
            .await
    }

    /// `adb pull <remote> <local>`
    pub async fn pull(&self, serial: &str, remote: &str, local: &Path) -> Result<CommandOutput> {
        let local = local.to_string_lossy();
        self.run(on_device(serial, &["pull", remote, &*local]).with_timeout(TRANSFER_TIMEOUT))
            .await
    }

    /// Kill an emulator through its console
    pub async fn emu_kill(&self, serial: &str) -> Result<CommandOutput> {
        self.run(on_device(serial, &["emu", "kill"]).with_timeout(SHELL_TIMEOUT))
            .await
    }
}

/// Parse `pm list packages` output: one `package:<name>` per line
fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Quote `value` for the device's POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
