//! Runtime configuration: where the SDK lives, which binaries to run, and the
//! textual markers used where exit codes are not trustworthy.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use which::which;

use crate::constants::{
    ADB, AVDMANAGER, EMULATOR, FALLBACK_ADB_PATH, LOG_LEVEL_ENV, SDK_ROOT_ENV_VARS, SDKMANAGER,
};
use crate::support::TracingLevel;

/// External binaries this server drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum AndroidTool {
    /// Android Debug Bridge
    Adb,
    /// Emulator launcher
    Emulator,
    /// AVD definition manager
    Avdmanager,
    /// SDK package manager
    Sdkmanager,
}

impl AndroidTool {
    const fn binary_name(self) -> &'static str {
        match self {
            Self::Adb => ADB,
            Self::Emulator => EMULATOR,
            Self::Avdmanager => AVDMANAGER,
            Self::Sdkmanager => SDKMANAGER,
        }
    }

    /// Locations relative to an SDK root, most preferred first
    const fn sdk_suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Adb => &["platform-tools/adb", "platform-tools/adb.exe"],
            Self::Emulator => &["emulator/emulator", "emulator/emulator.exe"],
            Self::Avdmanager => &[
                "cmdline-tools/latest/bin/avdmanager",
                "cmdline-tools/latest/bin/avdmanager.bat",
                "tools/bin/avdmanager",
            ],
            Self::Sdkmanager => &[
                "cmdline-tools/latest/bin/sdkmanager",
                "cmdline-tools/latest/bin/sdkmanager.bat",
                "tools/bin/sdkmanager",
            ],
        }
    }
}

/// Resolved binary paths for every [`AndroidTool`]
#[derive(Debug, Clone)]
pub struct ToolPaths {
    adb:        PathBuf,
    emulator:   PathBuf,
    avdmanager: PathBuf,
    sdkmanager: PathBuf,
}

impl ToolPaths {
    /// Resolve every tool: PATH first, then the SDK root, then a bare name so that the
    /// spawn failure surfaces with a remediation hint.
    pub fn resolve(sdk_roots: &[PathBuf]) -> Self {
        let find = |tool: AndroidTool| {
            which(tool.binary_name())
                .ok()
                .or_else(|| find_in_sdk_roots(tool, sdk_roots))
                .unwrap_or_else(|| match tool {
                    AndroidTool::Adb if Path::new(FALLBACK_ADB_PATH).exists() => {
                        PathBuf::from(FALLBACK_ADB_PATH)
                    }
                    _ => PathBuf::from(tool.binary_name()),
                })
        };

        Self {
            adb:        find(AndroidTool::Adb),
            emulator:   find(AndroidTool::Emulator),
            avdmanager: find(AndroidTool::Avdmanager),
            sdkmanager: find(AndroidTool::Sdkmanager),
        }
    }

    /// Paths that are exactly the bare binary names
    #[cfg(test)]
    pub fn bare() -> Self {
        Self {
            adb:        PathBuf::from(ADB),
            emulator:   PathBuf::from(EMULATOR),
            avdmanager: PathBuf::from(AVDMANAGER),
            sdkmanager: PathBuf::from(SDKMANAGER),
        }
    }

    /// Path of the given tool
    pub fn get(&self, tool: AndroidTool) -> &Path {
        match tool {
            AndroidTool::Adb => &self.adb,
            AndroidTool::Emulator => &self.emulator,
            AndroidTool::Avdmanager => &self.avdmanager,
            AndroidTool::Sdkmanager => &self.sdkmanager,
        }
    }

    #[cfg(test)]
    pub fn set(&mut self, tool: AndroidTool, path: PathBuf) {
        match tool {
            AndroidTool::Adb => self.adb = path,
            AndroidTool::Emulator => self.emulator = path,
            AndroidTool::Avdmanager => self.avdmanager = path,
            AndroidTool::Sdkmanager => self.sdkmanager = path,
        }
    }
}

/// Output markers that decide success for commands whose exit code is unreliable.
///
/// `pm uninstall` and `am start`/`monkey` exit 0 on several failure paths, so their
/// output text is scanned instead.
#[derive(Debug, Clone)]
pub struct SuccessMarkers {
    /// Printed by `pm uninstall` on success
    pub uninstall:      Vec<String>,
    /// Printed by `monkey` or `am start` when the launch happened
    pub launch:         Vec<String>,
    /// Printed by `am start` or `monkey` when the launch failed despite exit 0
    pub launch_failure: Vec<String>,
}

impl Default for SuccessMarkers {
    fn default() -> Self {
        Self {
            uninstall:      vec!["Success".to_string()],
            launch:         vec!["Events injected".to_string(), "Starting:".to_string()],
            launch_failure: vec![
                "Error:".to_string(),
                "No activities found".to_string(),
                "monkey aborted".to_string(),
            ],
        }
    }
}

impl SuccessMarkers {
    /// True when any marker in `markers` appears in `output`
    pub fn matches(markers: &[String], output: &str) -> bool {
        markers.iter().any(|marker| output.contains(marker.as_str()))
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// First existing SDK root, if any
    pub sdk_root:   Option<PathBuf>,
    /// Resolved binary paths
    pub tool_paths: ToolPaths,
    /// Output markers for marker-based success detection
    pub markers:    SuccessMarkers,
    /// Initial tracing level
    pub log_level:  TracingLevel,
}

impl ServerConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        let sdk_roots = sdk_roots();
        let log_level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|level| TracingLevel::from_str(&level).ok())
            .unwrap_or(TracingLevel::Warn);

        Self {
            sdk_root: sdk_roots.first().cloned(),
            tool_paths: ToolPaths::resolve(&sdk_roots),
            markers: SuccessMarkers::default(),
            log_level,
        }
    }

    /// Log the resolved configuration
    pub fn log_summary(&self) {
        tracing::info!(
            "SDK root: {}",
            self.sdk_root
                .as_deref()
                .map_or_else(|| "<not found>".to_string(), |p| p.display().to_string())
        );
        for tool in AndroidTool::iter() {
            tracing::info!("{}: {}", tool.as_ref(), self.tool_paths.get(tool).display());
        }
    }
}

/// Existing SDK roots in priority order: `ANDROID_HOME`, `ANDROID_SDK_ROOT`, then the
/// default install locations under the home directory
fn sdk_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    let mut push_root = |path: PathBuf| {
        if path.exists() && !roots.contains(&path) {
            roots.push(path);
        }
    };

    for var in SDK_ROOT_ENV_VARS {
        if let Ok(path) = std::env::var(var) {
            push_root(PathBuf::from(path));
        }
    }
    if let Some(home_path) = home::home_dir() {
        push_root(home_path.join("Library/Android/sdk"));
        push_root(home_path.join("Android/Sdk"));
    }
    roots
}

fn find_in_sdk_roots(tool: AndroidTool, sdk_roots: &[PathBuf]) -> Option<PathBuf> {
    sdk_roots.iter().find_map(|root| {
        tool.sdk_suffixes()
            .iter()
            .map(|suffix| root.join(suffix))
            .find(|candidate| candidate.exists())
    })
}
