//! Scripted [`CommandRunner`] for tests
#![allow(clippy::unwrap_used, reason = "a poisoned lock means a test already panicked")]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{CommandOutput, CommandRunner, CommandSpec, DetachedProcess, SdkEnvironment};
use crate::config::SuccessMarkers;
use crate::error::Result;

/// `adb devices -l` with a single online emulator
pub const ONE_EMULATOR: &str = "List of devices attached
emulator-5554          device product:sdk_gphone64_x86_64 model:Pixel_7 device:emu64xa transport_id:1
";

/// `adb devices -l` with nothing attached
pub const NO_DEVICES: &str = "List of devices attached\n\n";

/// Answers commands from a script and records every call.
///
/// A scripted command line matches exactly, or as a prefix when it ends with `*`.
/// Unscripted commands succeed with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    script:   Mutex<Vec<(String, CommandOutput)>>,
    calls:    Mutex<Vec<CommandSpec>>,
    detached: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command_line` with `output`; later entries win
    pub fn on(self, command_line: &str, output: CommandOutput) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert(0, (command_line.to_string(), output));
        self
    }

    /// Answer `adb devices -l` with `output`
    pub fn with_devices(self, output: &str) -> Self {
        self.on("adb devices -l", CommandOutput::ok(output))
    }

    /// Command lines run so far
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(CommandSpec::command_line)
            .collect()
    }

    /// Specs run so far, including stdin and timeout
    pub fn call_specs(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Command lines started detached
    pub fn detached(&self) -> Vec<String> {
        self.detached
            .lock()
            .unwrap()
            .iter()
            .map(CommandSpec::command_line)
            .collect()
    }

    /// Wrap in an environment with default markers
    pub fn into_environment(self) -> (Arc<Self>, SdkEnvironment) {
        let runner = Arc::new(self);
        let environment = SdkEnvironment::new(runner.clone(), SuccessMarkers::default());
        (runner, environment)
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec, _cancel: &CancellationToken) -> Result<CommandOutput> {
        let command_line = spec.command_line();
        self.calls.lock().unwrap().push(spec.clone());

        let script = self.script.lock().unwrap();
        let answer = script.iter().find(|(pattern, _)| {
            pattern.strip_suffix('*').map_or_else(
                || *pattern == command_line,
                |prefix| command_line.starts_with(prefix),
            )
        });
        Ok(answer.map_or_else(|| CommandOutput::ok(""), |(_, output)| output.clone()))
    }

    fn spawn_detached(&self, spec: &CommandSpec, log_path: &Path) -> Result<DetachedProcess> {
        self.detached.lock().unwrap().push(spec.clone());
        Ok(DetachedProcess {
            pid:      4242,
            log_path: log_path.to_path_buf(),
        })
    }
}
