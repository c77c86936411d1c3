// Log tools module

mod android_logcat;

pub use android_logcat::Logcat;
