// Device tools module

mod android_devices;
mod android_devices_list;
mod android_shell;

pub use android_devices::Devices;
pub use android_devices_list::DevicesList;
pub use android_shell::Shell;
