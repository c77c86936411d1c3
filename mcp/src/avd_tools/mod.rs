// Emulator (AVD) tools module

mod android_create_avd;
mod android_list_avds;
mod android_start_avd;
mod android_stop_avd;

pub use android_create_avd::CreateAvd;
pub use android_list_avds::ListAvds;
pub use android_start_avd::StartAvd;
pub use android_stop_avd::StopAvd;
