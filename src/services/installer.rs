use std::path::{Path, PathBuf};

use crate::instance::VisualStudioInstance;
use crate::process::{Invocation, OutputMode, ProcessError, ProcessRunner};

/// Runs the installer tool against an existing instance.
#[derive(Debug, Clone)]
pub struct InstallerService {
    installer: PathBuf,
    runner: ProcessRunner,
}

impl InstallerService {
    pub fn new(installer: impl Into<PathBuf>, runner: ProcessRunner) -> Self {
        Self {
            installer: installer.into(),
            runner,
        }
    }

    pub fn installer(&self) -> &Path {
        &self.installer
    }

    /// `modify --channelId <id> --productId <id> <args...>`.
    ///
    /// Channel and product are omitted when the locator did not report them.
    pub fn modify_invocation(&self, instance: &VisualStudioInstance, args: &[String]) -> Invocation {
        let mut invocation = Invocation::new(&self.installer).arg("modify");
        if !instance.channel_id.is_empty() {
            invocation = invocation.arg("--channelId").arg(&instance.channel_id);
        }
        if !instance.product_id.is_empty() {
            invocation = invocation.arg("--productId").arg(&instance.product_id);
        }
        invocation.args(args.iter().cloned())
    }

    /// Runs a modify operation, echoing installer output, and returns its exit code.
    pub async fn modify<F>(
        &self,
        instance: &VisualStudioInstance,
        args: &[String],
        on_line: F,
    ) -> Result<i32, ProcessError>
    where
        F: FnMut(&str),
    {
        let invocation = self.modify_invocation(instance, args);
        let outcome = self
            .runner
            .run(&invocation, OutputMode::Plain, on_line)
            .await?;
        Ok(outcome.exit_code)
    }

    /// The installer's own help text without its banners.
    pub async fn help(&self) -> Result<Vec<String>, ProcessError> {
        let invocation = Invocation::new(&self.installer).arg("-?");
        self.runner.help_lines(&invocation).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> InstallerService {
        InstallerService::new("/opt/vs/vs_installer", ProcessRunner::default())
    }

    #[test]
    fn test_modify_invocation_includes_channel_and_product() {
        let instance = VisualStudioInstance {
            channel_id: "VisualStudio.17.Release".to_string(),
            product_id: "Microsoft.VisualStudio.Product.Enterprise".to_string(),
            ..Default::default()
        };
        let args = vec!["--installPath".to_string(), "C:\\VS".to_string()];

        let invocation = service().modify_invocation(&instance, &args);

        assert_eq!(
            invocation.get_args(),
            [
                "modify",
                "--channelId",
                "VisualStudio.17.Release",
                "--productId",
                "Microsoft.VisualStudio.Product.Enterprise",
                "--installPath",
                "C:\\VS",
            ]
        );
    }

    #[test]
    fn test_modify_invocation_skips_unknown_channel_and_product() {
        let invocation = service().modify_invocation(&VisualStudioInstance::default(), &[]);
        assert_eq!(invocation.get_args(), ["modify"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_modify_returns_exit_code() {
        let service = InstallerService::new("false", ProcessRunner::default());
        let code = service
            .modify(&VisualStudioInstance::default(), &[], |_| {})
            .await
            .unwrap();
        assert_ne!(code, 0);
    }
}
