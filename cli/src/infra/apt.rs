//! Infrastructure implementation of the `SystemPackageManager` port for apt.

use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, SystemPackageManager};
use crate::infra::command_runner::TokioCommandRunner;

/// `apt-get` adapter. Mutating calls go through `sudo`.
pub struct AptPackageManager<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AptPackageManager<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl AptPackageManager<TokioCommandRunner> {
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> SystemPackageManager for AptPackageManager<R> {
    async fn is_available(&self) -> bool {
        let available = self
            .runner
            .run("apt-get", &["--version"])
            .await
            .is_ok_and(|o| o.status.success());
        tracing::debug!(available, "probed apt-get");
        available
    }

    async fn update_index(&self) -> Result<ExitStatus> {
        self.runner
            .run_status("sudo", &["apt-get", "update"])
            .await
            .context("sudo apt-get update")
    }

    async fn install(&self, packages: &[String]) -> Result<ExitStatus> {
        let mut args = vec!["apt-get", "install", "-y"];
        args.extend(packages.iter().map(String::as_str));
        self.runner
            .run_status("sudo", &args)
            .await
            .context("sudo apt-get install")
    }
}
