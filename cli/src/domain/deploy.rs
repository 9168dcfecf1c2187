//! Deployment domain types: target identity, instance state and liveness policy.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Restart policy applied to every launched instance.
pub const RESTART_POLICY: &str = "unless-stopped";

/// Log lines shown after a successful liveness check.
pub const DEFAULT_TAIL_LINES: u32 = 20;

/// A host directory exposed inside the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindMount {
    /// Path relative to the project directory (e.g. `downloads`).
    pub host: String,
    /// Absolute path inside the instance (e.g. `/app/downloads`).
    pub container: String,
}

impl BindMount {
    #[must_use]
    pub fn new(host: &str, container: &str) -> Self {
        Self {
            host: host.to_string(),
            container: container.to_string(),
        }
    }

    /// Resolve the host side against the project directory.
    ///
    /// Absolute host paths are kept as-is.
    #[must_use]
    pub fn host_path(&self, project_dir: &Path) -> PathBuf {
        let host = Path::new(&self.host);
        if host.is_absolute() {
            host.to_path_buf()
        } else {
            project_dir.join(host)
        }
    }

    /// `-v` argument value: `<host>:<container>`.
    #[must_use]
    pub fn volume_arg(&self, project_dir: &Path) -> String {
        format!("{}:{}", self.host_path(project_dir).display(), self.container)
    }
}

/// Fixed identity of the deployed application. Immutable for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub app_name: String,
    pub image: String,
    pub container: String,
    pub host_port: u16,
    pub container_port: u16,
    pub mounts: Vec<BindMount>,
}

impl Default for DeploymentTarget {
    fn default() -> Self {
        Self {
            app_name: "YouTube Downloader".to_string(),
            image: "youtube-downloader:latest".to_string(),
            container: "youtube-downloader".to_string(),
            host_port: 8501,
            container_port: 8501,
            mounts: vec![
                BindMount::new("downloads", "/app/downloads"),
                BindMount::new("logs", "/app/logs"),
            ],
        }
    }
}

impl DeploymentTarget {
    /// `-p` argument value: `<host>:<container>`.
    #[must_use]
    pub fn port_arg(&self) -> String {
        format!("{}:{}", self.host_port, self.container_port)
    }

    /// Local URL the application is served on.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.host_port)
    }
}

/// Instance state as reported by the container runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceState {
    Running,
    Restarting,
    Created,
    Paused,
    Exited,
    Dead,
    NotFound,
}

impl InstanceState {
    /// Parse `docker inspect --format '{{.State.Status}}'` output.
    ///
    /// Unknown values map to `Dead` so they never count as active.
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status.trim().trim_matches('\'').to_ascii_lowercase().as_str() {
            "running" => Self::Running,
            "restarting" => Self::Restarting,
            "created" => Self::Created,
            "paused" => Self::Paused,
            "exited" => Self::Exited,
            _ => Self::Dead,
        }
    }

    /// Only a running instance counts as active.
    #[must_use]
    pub fn is_active(self) -> bool {
        self == Self::Running
    }

    /// Whether an instance with this name is registered with the runtime.
    #[must_use]
    pub fn exists(self) -> bool {
        self != Self::NotFound
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Restarting => "restarting",
            Self::Created => "created",
            Self::Paused => "paused",
            Self::Exited => "exited",
            Self::Dead => "dead",
            Self::NotFound => "not found",
        };
        f.write_str(s)
    }
}

/// Snapshot of the deployed instance, rendered by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceStatus {
    pub name: String,
    pub image: String,
    pub state: InstanceState,
    /// Only set while the instance is running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InstanceStatus {
    #[must_use]
    pub fn new(target: &DeploymentTarget, state: InstanceState) -> Self {
        Self {
            name: target.container.clone(),
            image: target.image.clone(),
            state,
            url: state.is_active().then(|| target.url()),
        }
    }
}

/// Post-launch liveness check policy.
///
/// The default is a single check after a fixed 10 second grace period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessPolicy {
    pub grace_period: Duration,
    pub attempts: u32,
    pub interval: Duration,
    pub tail_lines: u32,
}

impl Default for LivenessPolicy {
    fn default() -> Self {
        Self {
            grace_period: Duration::from_secs(10),
            attempts: 1,
            interval: Duration::from_secs(2),
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }
}

/// Outcome of a completed deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The new instance was running at the liveness check.
    Verified {
        /// Whether a previous instance was stopped/removed first.
        replaced: bool,
    },
}
