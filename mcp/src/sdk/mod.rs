//! Typed access to the bridge (`adb`), the emulator, `avdmanager` and `sdkmanager`.
//!
//! Nothing here is cached: every call re-queries the external tool.

mod adb;
mod avd;
mod command;
mod sdkmanager;

use std::sync::Arc;

use error_stack::Report;
use tokio_util::sync::CancellationToken;

pub use self::adb::shell_quote;
pub use self::avd::AvdDefinition;
pub use self::command::{
    CommandOutput, CommandRunner, CommandSpec, DetachedProcess, SystemCommandRunner,
};
use crate::config::{ServerConfig, SuccessMarkers};
use crate::error::{Error, Result};

/// Long lived state shared by every invocation
pub struct SdkEnvironment {
    runner:  Arc<dyn CommandRunner>,
    markers: SuccessMarkers,
}

impl SdkEnvironment {
    /// Environment that runs real processes as configured
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(SystemCommandRunner::new(config.tool_paths.clone())),
            config.markers.clone(),
        )
    }

    /// Environment with an explicit runner
    pub fn new(runner: Arc<dyn CommandRunner>, markers: SuccessMarkers) -> Self {
        Self { runner, markers }
    }

    /// Handle for one invocation, bound to its cancellation token
    pub fn session<'a>(&'a self, cancel: &'a CancellationToken) -> Sdk<'a> {
        Sdk {
            runner: self.runner.as_ref(),
            markers: &self.markers,
            cancel,
        }
    }
}

/// Per-invocation handle; every external call made through it honors the invocation's
/// cancellation token
#[derive(Clone, Copy)]
pub struct Sdk<'a> {
    runner:  &'a dyn CommandRunner,
    markers: &'a SuccessMarkers,
    cancel:  &'a CancellationToken,
}

impl Sdk<'_> {
    /// Markers for commands whose exit code cannot be trusted
    pub const fn markers(&self) -> &SuccessMarkers {
        self.markers
    }

    /// Run and capture; non-zero exit is returned, not raised
    pub async fn run(&self, spec: CommandSpec) -> Result<CommandOutput> {
        self.runner.run(&spec, self.cancel).await
    }

    /// Run and raise non-zero exit as `Failed to {action}: {stderr}`
    pub async fn run_checked(
        &self,
        spec: CommandSpec,
        action: &str,
        hint: Option<&'static str>,
    ) -> Result<CommandOutput> {
        let output = self.run(spec).await?;
        if output.success() {
            return Ok(output);
        }

        let hint = hint.or_else(|| command::failure_hint(&output));
        Err(Report::new(Error::ExternalToolFailure {
            message: format!("Failed to {action}: {}", output.failure_detail()),
            hint,
        }))
    }

    fn spawn_detached(
        &self,
        spec: &CommandSpec,
        log_path: &std::path::Path,
    ) -> Result<DetachedProcess> {
        self.runner.spawn_detached(spec, log_path)
    }
}

#[cfg(test)]
pub mod testing;
