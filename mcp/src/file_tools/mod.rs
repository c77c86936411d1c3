// File transfer tools module

mod android_pull_file;
mod android_push_file;

pub use android_pull_file::PullFile;
pub use android_push_file::PushFile;
