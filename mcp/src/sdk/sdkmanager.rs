use super::{CommandOutput, CommandSpec, Sdk};
use crate::config::AndroidTool;
use crate::constants::{LICENSE_ACCEPT_RESPONSES, LIST_TIMEOUT, SDK_INSTALL_TIMEOUT, SDK_PATH_HINT};
use crate::error::Result;

/// `y` answers for up to [`LICENSE_ACCEPT_RESPONSES`] license prompts
fn license_answers() -> String {
    "y\n".repeat(LICENSE_ACCEPT_RESPONSES)
}

fn sdkmanager(args: Vec<&str>, accept_licenses: bool) -> CommandSpec {
    let spec = CommandSpec::new(AndroidTool::Sdkmanager, args);
    if accept_licenses {
        spec.with_stdin(license_answers())
    } else {
        spec
    }
}

impl Sdk<'_> {
    /// Non-blank lines of `sdkmanager --list`
    pub async fn sdk_list(&self, include_obsolete: bool) -> Result<Vec<String>> {
        let mut args = vec!["--list"];
        if include_obsolete {
            args.push("--include_obsolete");
        }
        let output = self
            .run_checked(
                sdkmanager(args, false).with_timeout(LIST_TIMEOUT),
                "list SDK packages",
                Some(SDK_PATH_HINT),
            )
            .await?;
        Ok(output
            .stdout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// `sdkmanager <package>`
    pub async fn sdk_install(&self, package: &str, accept_licenses: bool) -> Result<CommandOutput> {
        self.run_checked(
            sdkmanager(vec![package], accept_licenses).with_timeout(SDK_INSTALL_TIMEOUT),
            &format!("install SDK package '{package}'"),
            Some(SDK_PATH_HINT),
        )
        .await
    }

    /// `sdkmanager --update`
    pub async fn sdk_update(&self, accept_licenses: bool) -> Result<CommandOutput> {
        self.run_checked(
            sdkmanager(vec!["--update"], accept_licenses).with_timeout(SDK_INSTALL_TIMEOUT),
            "update SDK packages",
            Some(SDK_PATH_HINT),
        )
        .await
    }
}

#[allow(clippy::unwrap_used, reason = "test failures should panic")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::ScriptedRunner;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_install_feeds_license_answers() {
        let (runner, environment) = ScriptedRunner::new().into_environment();
        let cancel = CancellationToken::new();

        environment
            .session(&cancel)
            .sdk_install("platform-tools", true)
            .await
            .unwrap();

        let spec = &runner.call_specs()[0];
        assert_eq!(spec.command_line(), "sdkmanager platform-tools");
        let stdin = spec.stdin.as_deref().unwrap();
        assert_eq!(stdin.lines().count(), LICENSE_ACCEPT_RESPONSES);
        assert!(stdin.lines().all(|line| line == "y"));
    }

    #[tokio::test]
    async fn test_install_without_licenses_closes_stdin() {
        let (runner, environment) = ScriptedRunner::new().into_environment();
        let cancel = CancellationToken::new();

        environment
            .session(&cancel)
            .sdk_install("platform-tools", false)
            .await
            .unwrap();
        assert_eq!(runner.call_specs()[0].stdin, None);
    }

    #[tokio::test]
    async fn test_update_failure_is_external_failure() {
        let (_, environment) = ScriptedRunner::new()
            .on(
                "sdkmanager --update",
                CommandOutput::failed(1, "Warning: license not accepted"),
            )
            .into_environment();
        let cancel = CancellationToken::new();

        let text = environment
            .session(&cancel)
            .sdk_update(false)
            .await
            .unwrap_err()
            .current_context()
            .to_string();
        assert!(text.starts_with("Failed to update SDK packages: Warning: license not accepted"));
        assert!(text.contains(SDK_PATH_HINT));
    }
}
