//! Infrastructure implementation of the container runtime port traits.
//!
//! `DockerRuntime<R>` routes all docker CLI calls through a `CommandRunner`.

use std::path::Path;
use std::process::{ExitStatus, Output};

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandRunner, ImageBuilder, InstanceInspector, InstanceLifecycle, LaunchSpec,
};
use crate::infra::command_runner::TokioCommandRunner;

/// Infrastructure adapter that routes all docker CLI calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct DockerRuntime<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> DockerRuntime<R> {
    /// Create a runtime adapter invoking `program` (normally `docker`).
    pub fn new(runner: R, program: &str) -> Self {
        Self {
            runner,
            program: program.to_string(),
        }
    }
}

impl DockerRuntime<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default(), "docker")
    }
}

/// Arguments for `docker run` built from a launch spec.
#[must_use]
pub fn run_args(spec: &LaunchSpec<'_>) -> Vec<String> {
    let target = spec.target;
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        target.container.clone(),
        "-p".to_string(),
        target.port_arg(),
    ];
    for mount in &target.mounts {
        args.push("-v".to_string());
        args.push(mount.volume_arg(spec.project_dir));
    }
    args.push("--restart".to_string());
    args.push(spec.restart_policy.to_string());
    args.push(target.image.clone());
    args
}

impl<R: CommandRunner> ImageBuilder for DockerRuntime<R> {
    async fn build(&self, image: &str, context: &Path) -> Result<ExitStatus> {
        let context = context
            .to_str()
            .context("build context path is not valid UTF-8")?;
        self.runner
            .run_status(&self.program, &["build", "-t", image, context])
            .await
            .context("docker build")
    }
}

impl<R: CommandRunner> InstanceLifecycle for DockerRuntime<R> {
    async fn launch(&self, spec: &LaunchSpec<'_>) -> Result<Output> {
        let args = run_args(spec);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run(&self.program, &arg_refs)
            .await
            .context("docker run")
    }

    async fn stop(&self, name: &str) -> Result<Output> {
        self.runner
            .run(&self.program, &["stop", name])
            .await
            .context("docker stop")
    }

    async fn remove(&self, name: &str) -> Result<Output> {
        self.runner
            .run(&self.program, &["rm", name])
            .await
            .context("docker rm")
    }
}

impl<R: CommandRunner> InstanceInspector for DockerRuntime<R> {
    async fn inspect(&self, name: &str) -> Result<Output> {
        self.runner
            .run(
                &self.program,
                &["inspect", "--type", "container", "--format", "{{.State.Status}}", name],
            )
            .await
            .context("docker inspect")
    }

    async fn logs(&self, name: &str, tail: Option<u32>) -> Result<Output> {
        let tail = tail.map(|n| n.to_string());
        let mut args = vec!["logs"];
        if let Some(n) = tail.as_deref() {
            args.extend(["--tail", n]);
        }
        args.push(name);
        self.runner
            .run(&self.program, &args)
            .await
            .context("docker logs")
    }

    async fn version(&self) -> Result<Output> {
        self.runner
            .run(&self.program, &["--version"])
            .await
            .context("docker --version")
    }

    async fn info(&self) -> Result<Output> {
        self.runner
            .run(&self.program, &["info", "--format", "{{.ServerVersion}}"])
            .await
            .context("docker info")
    }
}
