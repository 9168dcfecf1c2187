//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`: never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;

use crate::domain::{DeploymentTarget, ToolConfig};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Launch parameters for a new instance.
pub struct LaunchSpec<'a> {
    /// Name, image, port mapping and mounts.
    pub target: &'a DeploymentTarget,
    /// Directory that relative mount paths resolve against.
    pub project_dir: &'a Path,
    /// Restart policy, e.g. `"unless-stopped"`.
    pub restart_policy: &'a str,
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// Used for long-running steps whose output the operator should see live.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Container Runtime Ports ───────────────────────────────────────────────────

/// Builds images from a build context.
#[allow(async_fn_in_trait)]
pub trait ImageBuilder {
    /// Build `context` and tag the result as `image`.
    async fn build(&self, image: &str, context: &Path) -> Result<ExitStatus>;
}

/// Instance lifecycle operations: launch, stop, remove.
#[allow(async_fn_in_trait)]
pub trait InstanceLifecycle {
    /// Launch a new detached instance.
    async fn launch(&self, spec: &LaunchSpec<'_>) -> Result<Output>;
    /// Stop a running instance.
    async fn stop(&self, name: &str) -> Result<Output>;
    /// Remove a stopped instance's registration.
    async fn remove(&self, name: &str) -> Result<Output>;
}

/// Instance and runtime inspection.
#[allow(async_fn_in_trait)]
pub trait InstanceInspector {
    /// Query the instance status; a non-zero exit means it does not exist.
    async fn inspect(&self, name: &str) -> Result<Output>;
    /// Fetch instance logs, optionally only the last `tail` lines.
    async fn logs(&self, name: &str, tail: Option<u32>) -> Result<Output>;
    /// Client version banner.
    async fn version(&self) -> Result<Output>;
    /// Daemon information; a non-zero exit means the daemon is unreachable.
    async fn info(&self) -> Result<Output>;
}

/// Composite trait: any type implementing all three sub-traits is a `ContainerRuntime`.
pub trait ContainerRuntime: ImageBuilder + InstanceLifecycle + InstanceInspector {}

/// Blanket implementation: any type implementing all three sub-traits is a `ContainerRuntime`.
impl<T> ContainerRuntime for T where T: ImageBuilder + InstanceLifecycle + InstanceInspector {}

// ── Environment Ports ─────────────────────────────────────────────────────────

/// Interpreter and isolated-environment operations.
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    /// Run the host interpreter's `--version`.
    async fn interpreter_version(&self) -> Result<Output>;
    /// Create the isolated environment.
    async fn create_env(&self) -> Result<ExitStatus>;
    /// Run the environment's interpreter with `args`.
    async fn run_python(&self, args: &[&str]) -> Result<ExitStatus>;
    /// Run a tool installed into the environment's bin directory.
    async fn run_tool(&self, tool: &str, args: &[&str]) -> Result<ExitStatus>;
}

/// Operating-system package manager, used only when present.
#[allow(async_fn_in_trait)]
pub trait SystemPackageManager {
    /// Capability probe: `false` means skip system packages.
    async fn is_available(&self) -> bool;
    /// Refresh the package index.
    async fn update_index(&self) -> Result<ExitStatus>;
    /// Install `packages` non-interactively.
    async fn install(&self, packages: &[String]) -> Result<ExitStatus>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts local filesystem operations used by the workflows.
pub trait LocalFs {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Create `path` and all parents; succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Entries directly under `path`.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    /// Add execute permission wherever read permission is set.
    fn make_executable(&self, path: &Path) -> Result<()>;
}

// ── Timing Port ───────────────────────────────────────────────────────────────

/// Abstracts waiting so the liveness grace period can be skipped in tests.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit a block of instance logs under a heading.
    fn logs(&self, heading: &str, body: &str);
    /// Emit logs that explain a failure. Unlike `logs`, these must reach the
    /// user even when regular progress output is suppressed.
    fn failure_logs(&self, heading: &str, body: &str) {
        self.logs(heading, body);
    }
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration loading.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<ToolConfig>;
    /// Path of the file `load` reads, or `None` when only defaults apply.
    fn path(&self) -> Option<PathBuf>;
}
