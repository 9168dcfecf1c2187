//! Infrastructure implementation of the `Toolchain` port for Python.
//!
//! The host interpreter is only used to report its version and to create the
//! virtual environment; everything afterwards runs through the environment's
//! own interpreter and tool shims.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, Toolchain};
use crate::domain::BootstrapPlan;
use crate::infra::command_runner::TokioCommandRunner;

/// Python toolchain adapter, generic over the process runner.
pub struct PythonToolchain<R: CommandRunner> {
    runner: R,
    interpreter: String,
    env_dir: PathBuf,
}

impl<R: CommandRunner> PythonToolchain<R> {
    pub fn new(runner: R, interpreter: &str, env_dir: PathBuf) -> Self {
        Self {
            runner,
            interpreter: interpreter.to_string(),
            env_dir,
        }
    }

    /// Path of an executable inside the environment's bin directory.
    #[must_use]
    pub fn env_bin(&self, tool: &str) -> PathBuf {
        env_bin(&self.env_dir, tool)
    }
}

impl PythonToolchain<TokioCommandRunner> {
    /// Production toolchain for `plan`.
    #[must_use]
    pub fn for_plan(plan: &BootstrapPlan) -> Self {
        Self::new(TokioCommandRunner::default(), &plan.interpreter, plan.env_path())
    }
}

#[cfg(not(windows))]
fn env_bin(env_dir: &Path, tool: &str) -> PathBuf {
    env_dir.join("bin").join(tool)
}

#[cfg(windows)]
fn env_bin(env_dir: &Path, tool: &str) -> PathBuf {
    env_dir.join("Scripts").join(format!("{tool}.exe"))
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("path is not valid UTF-8: {}", path.display()))
}

impl<R: CommandRunner> Toolchain for PythonToolchain<R> {
    async fn interpreter_version(&self) -> Result<Output> {
        self.runner
            .run(&self.interpreter, &["--version"])
            .await
            .with_context(|| format!("{} --version", self.interpreter))
    }

    async fn create_env(&self) -> Result<ExitStatus> {
        let env = path_str(&self.env_dir)?;
        self.runner
            .run_status(&self.interpreter, &["-m", "venv", env])
            .await
            .context("creating virtual environment")
    }

    async fn run_python(&self, args: &[&str]) -> Result<ExitStatus> {
        self.run_tool("python", args).await
    }

    async fn run_tool(&self, tool: &str, args: &[&str]) -> Result<ExitStatus> {
        let bin = self.env_bin(tool);
        let program = path_str(&bin)?;
        self.runner
            .run_status(program, args)
            .await
            .with_context(|| format!("running {tool} from the virtual environment"))
    }
}
