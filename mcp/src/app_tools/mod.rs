// App tools module

mod android_install_apk;
mod android_launch_app;
mod android_list_packages;
mod android_uninstall_app;

use std::sync::LazyLock;

use error_stack::Report;
use regex::Regex;

pub use android_install_apk::InstallApk;
pub use android_launch_app::LaunchApp;
pub use android_list_packages::ListPackages;
pub use android_uninstall_app::UninstallApp;

use crate::error::{Error, Result};
use crate::tool::ParameterName;

// Both names are interpolated into device shell commands, so anything beyond the
// identifier grammar is rejected
static PACKAGE_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*$").ok());
static ACTIVITY_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\.?[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").ok());

fn validate_name(pattern: &LazyLock<Option<Regex>>, key: ParameterName, value: &str) -> Result<()> {
    let valid = pattern
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value));
    if valid {
        Ok(())
    } else {
        Err(Report::new(Error::Validation(format!(
            "'{}' is not a valid name: '{value}'",
            key.key()
        ))))
    }
}

/// Reject anything that is not a Java-style package name
fn validate_package_name(value: &str) -> Result<()> {
    validate_name(&PACKAGE_NAME, ParameterName::PackageName, value)
}

/// Reject anything that is not a class name, optionally relative (`.MainActivity`)
fn validate_activity_name(value: &str) -> Result<()> {
    validate_name(&ACTIVITY_NAME, ParameterName::ActivityName, value)
}
