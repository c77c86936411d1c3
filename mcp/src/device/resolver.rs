use error_stack::{Report, ResultExt};
use itertools::Itertools;

use super::{Device, DeviceState};
use crate::error::{Error, Result};

/// Which devices an operation may target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceScope {
    /// Physical devices and emulators
    Any,
    /// Emulator instances only
    EmulatorOnly,
}

/// How a device is chosen when the caller names none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// First online device in bridge enumeration order. Offline and unauthorized
    /// entries are skipped rather than chosen and failed on.
    #[default]
    FirstOnline,
}

/// Pick the target device from a fresh enumeration.
///
/// An explicit serial is honored exactly: it is never replaced by another device.
pub fn resolve_device(
    devices: &[Device],
    serial: Option<&str>,
    scope: DeviceScope,
    policy: SelectionPolicy,
) -> Result<Device> {
    if devices.is_empty() {
        return Err(Report::new(match scope {
            DeviceScope::Any => Error::NoDevices,
            DeviceScope::EmulatorOnly => no_emulators(),
        }));
    }

    match serial {
        Some(serial) => resolve_explicit(devices, serial, scope),
        None => resolve_default(devices, scope, policy),
    }
}

fn resolve_explicit(devices: &[Device], serial: &str, scope: DeviceScope) -> Result<Device> {
    let Some(device) = devices.iter().find(|device| device.serial == serial) else {
        let message = match scope {
            DeviceScope::Any => format!("Device with serial '{serial}' not found."),
            DeviceScope::EmulatorOnly => format!("Emulator with serial '{serial}' not found."),
        };
        return Err(Report::new(Error::NotFound(message)))
            .attach(format!("Connected: {}", describe(devices)));
    };

    if scope == DeviceScope::EmulatorOnly && !device.is_emulator() {
        return Err(Report::new(Error::DeviceUnavailable(format!(
            "Device with serial '{serial}' is not an emulator."
        ))));
    }

    ensure_online(device)?;
    Ok(device.clone())
}

fn resolve_default(
    devices: &[Device],
    scope: DeviceScope,
    policy: SelectionPolicy,
) -> Result<Device> {
    let candidates: Vec<&Device> = devices
        .iter()
        .filter(|device| scope == DeviceScope::Any || device.is_emulator())
        .collect();

    if candidates.is_empty() {
        return Err(Report::new(no_emulators()));
    }

    let chosen = match policy {
        SelectionPolicy::FirstOnline => candidates.iter().find(|device| device.is_online()),
    };

    chosen.map_or_else(
        || {
            Err(Report::new(Error::DeviceUnavailable(format!(
                "No online device available. Connected: {}",
                describe(candidates.iter().copied())
            ))))
        },
        |device| {
            tracing::debug!("Selected device {} ({policy:?})", device.serial);
            Ok((*device).clone())
        },
    )
}

fn ensure_online(device: &Device) -> Result<()> {
    match &device.state {
        DeviceState::Online => Ok(()),
        DeviceState::Unauthorized => Err(Report::new(Error::DeviceUnavailable(format!(
            "Device '{}' is unauthorized. Accept the USB debugging prompt on the device and retry.",
            device.serial
        )))),
        state => Err(Report::new(Error::DeviceUnavailable(format!(
            "Device '{}' is {state}, not online.",
            device.serial
        )))),
    }
}

fn no_emulators() -> Error {
    Error::NotFound("No running emulators found.".to_string())
}

fn describe<'a>(devices: impl IntoIterator<Item = &'a Device>) -> String {
    devices
        .into_iter()
        .map(|device| format!("{} ({})", device.serial, device.state))
        .join(", ")
}
