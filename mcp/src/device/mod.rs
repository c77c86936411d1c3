//! Devices as reported by `adb devices -l`, and the policy that picks one

mod resolver;

use std::fmt::{self, Display};

pub use resolver::{DeviceScope, SelectionPolicy, resolve_device};

use crate::constants::EMULATOR_SERIAL_PREFIX;

/// Connection state reported by the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    /// `device`: ready for commands
    Online,
    /// `offline`: connected but not responding
    Offline,
    /// `unauthorized`: RSA key not accepted on the device
    Unauthorized,
    /// Anything else the bridge reports (`recovery`, `no permissions`, ...)
    Other(String),
}

impl DeviceState {
    fn parse(state: &str) -> Self {
        match state {
            "device" => Self::Online,
            "offline" => Self::Offline,
            "unauthorized" => Self::Unauthorized,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => f.write_str("device"),
            Self::Offline => f.write_str("offline"),
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Other(state) => f.write_str(state),
        }
    }
}

/// One entry of the bridge's device list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Serial, unique while connected
    pub serial:  String,
    /// Connection state
    pub state:   DeviceState,
    /// `model:` property, if reported
    pub model:   Option<String>,
    /// `product:` property, if reported
    pub product: Option<String>,
}

impl Device {
    /// True for emulator instances, which the bridge names `emulator-<port>`
    pub fn is_emulator(&self) -> bool {
        self.serial.starts_with(EMULATOR_SERIAL_PREFIX)
    }

    /// True when the device accepts commands
    pub fn is_online(&self) -> bool {
        self.state == DeviceState::Online
    }
}

/// Parse the output of `adb devices -l`.
///
/// Skips the header, blank lines and daemon status lines (`* daemon started ...`).
/// Preserves bridge enumeration order.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("List of devices") && !line.starts_with('*')
        })
        .filter_map(parse_device_line)
        .collect()
}

fn parse_device_line(line: &str) -> Option<Device> {
    let mut tokens = line.split_whitespace().peekable();
    let serial = tokens.next()?.to_string();

    // "no permissions (...)" is the one multi-word state
    let state = match tokens.next()? {
        "no" if tokens.peek() == Some(&"permissions") => {
            tokens.next();
            DeviceState::Other("no permissions".to_string())
        }
        state => DeviceState::parse(state),
    };

    let mut model = None;
    let mut product = None;
    for token in tokens {
        if let Some(value) = token.strip_prefix("model:") {
            model = Some(value.to_string());
        } else if let Some(value) = token.strip_prefix("product:") {
            product = Some(value.to_string());
        }
    }

    Some(Device {
        serial,
        state,
        model,
        product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICES_OUTPUT: &str = "* daemon not running; starting now at tcp:5037
* daemon started successfully
List of devices attached
emulator-5554          device product:sdk_gphone64_x86_64 model:sdk_gphone64_x86_64 device:emu64xa transport_id:1
R58M123ABC             unauthorized usb:1-1 transport_id:2
0123456789ABCDEF       no permissions (user in plugdev group); see [http://developer.android.com/tools/device.html] usb:1-2

";

    #[test]
    fn test_parse_device_list() {
        let devices = parse_device_list(DEVICES_OUTPUT);
        assert_eq!(devices.len(), 3);

        assert_eq!(devices[0].serial, "emulator-5554");
        assert_eq!(devices[0].state, DeviceState::Online);
        assert_eq!(devices[0].model.as_deref(), Some("sdk_gphone64_x86_64"));
        assert_eq!(devices[0].product.as_deref(), Some("sdk_gphone64_x86_64"));
        assert!(devices[0].is_emulator());

        assert_eq!(devices[1].serial, "R58M123ABC");
        assert_eq!(devices[1].state, DeviceState::Unauthorized);
        assert_eq!(devices[1].model, None);
        assert!(!devices[1].is_emulator());

        assert_eq!(
            devices[2].state,
            DeviceState::Other("no permissions".to_string())
        );
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_device_list("List of devices attached\n\n").is_empty());
        assert!(parse_device_list("").is_empty());
    }

    #[test]
    fn test_state_display_round_trips_bridge_names() {
        assert_eq!(DeviceState::Online.to_string(), "device");
        assert_eq!(DeviceState::parse("offline"), DeviceState::Offline);
        assert_eq!(DeviceState::parse("recovery").to_string(), "recovery");
    }
}
