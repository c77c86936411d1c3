// SDK tools module

mod android_sdk_manager;

pub use android_sdk_manager::SdkManager;
