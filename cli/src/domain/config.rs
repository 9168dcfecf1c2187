//! Domain types and validators for Tubedeck configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::bootstrap::BootstrapPlan;
use crate::domain::deploy::{BindMount, DEFAULT_TAIL_LINES, DeploymentTarget, LivenessPolicy};
use crate::domain::error::ConfigError;
use crate::domain::version::InterpreterVersion;

// ── Constants ────────────────────────────────────────────────────────────────

/// Minimum interpreter version declared by the application (`python_requires`).
pub const DEFAULT_MIN_VERSION: &str = "3.9";

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static CONTAINER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*$").expect("valid container name regex")
});

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration, typically stored in `tubedeck.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolConfig {
    /// Build-and-run settings.
    pub deploy: DeployConfig,
    /// Environment bootstrap settings.
    pub bootstrap: BootstrapConfig,
}

/// Build-and-run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub app_name: String,
    pub image: String,
    pub container: String,
    pub host_port: u16,
    pub container_port: u16,
    pub mounts: Vec<BindMount>,
    pub liveness: LivenessConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let target = DeploymentTarget::default();
        Self {
            app_name: target.app_name,
            image: target.image,
            container: target.container,
            host_port: target.host_port,
            container_port: target.container_port,
            mounts: target.mounts,
            liveness: LivenessConfig::default(),
        }
    }
}

impl DeployConfig {
    /// The deployment target described by this section.
    #[must_use]
    pub fn target(&self) -> DeploymentTarget {
        DeploymentTarget {
            app_name: self.app_name.clone(),
            image: self.image.clone(),
            container: self.container.clone(),
            host_port: self.host_port,
            container_port: self.container_port,
            mounts: self.mounts.clone(),
        }
    }
}

/// Liveness check settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    pub grace_period_secs: u64,
    pub attempts: u32,
    pub interval_secs: u64,
    pub tail_lines: u32,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        let policy = LivenessPolicy::default();
        Self {
            grace_period_secs: policy.grace_period.as_secs(),
            attempts: policy.attempts,
            interval_secs: policy.interval.as_secs(),
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }
}

impl LivenessConfig {
    #[must_use]
    pub fn policy(&self) -> LivenessPolicy {
        LivenessPolicy {
            grace_period: Duration::from_secs(self.grace_period_secs),
            attempts: self.attempts,
            interval: Duration::from_secs(self.interval_secs),
            tail_lines: self.tail_lines,
        }
    }
}

/// Environment bootstrap settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub interpreter: String,
    pub min_version: String,
    pub env_dir: String,
    pub manifest: String,
    pub system_packages: Vec<String>,
    pub directories: Vec<String>,
    pub scripts_dir: String,
    pub hook_config: String,
    pub test_args: Vec<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            min_version: DEFAULT_MIN_VERSION.to_string(),
            env_dir: "venv".to_string(),
            manifest: "requirements.txt".to_string(),
            system_packages: vec!["ffmpeg".to_string()],
            directories: vec!["downloads".into(), "logs".into(), "temp".into()],
            scripts_dir: "scripts".to_string(),
            hook_config: ".pre-commit-config.yaml".to_string(),
            test_args: vec!["tests/".into(), "-v".into()],
        }
    }
}

impl BootstrapConfig {
    /// Resolve this section into a plan rooted at `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_version` is not a dotted number.
    pub fn plan(&self, project_dir: &Path) -> Result<BootstrapPlan> {
        let min_version: InterpreterVersion =
            self.min_version
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "bootstrap.min_version".to_string(),
                    value: self.min_version.clone(),
                    hint: "Expected a dotted version such as 3.9".to_string(),
                })?;
        Ok(BootstrapPlan {
            project_dir: project_dir.to_path_buf(),
            interpreter: self.interpreter.clone(),
            min_version,
            env_dir: self.env_dir.clone(),
            manifest: self.manifest.clone(),
            system_packages: self.system_packages.clone(),
            directories: self.directories.clone(),
            scripts_dir: self.scripts_dir.clone(),
            hook_config: self.hook_config.clone(),
            test_args: self.test_args.clone(),
        })
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates an instance name against the container runtime's naming rule.
///
/// # Errors
///
/// Returns an error if the name is empty or contains disallowed characters.
pub fn validate_container_name(name: &str) -> Result<()> {
    if !CONTAINER_NAME_RE.is_match(name) {
        return Err(ConfigError::InvalidValue {
            key: "deploy.container".to_string(),
            value: name.to_string(),
            hint: "Names must match [a-zA-Z0-9][a-zA-Z0-9_.-]*".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates a whole configuration.
///
/// # Errors
///
/// Returns the first invalid or missing value found.
pub fn validate_config(config: &ToolConfig) -> Result<()> {
    let deploy = &config.deploy;
    if deploy.image.trim().is_empty() {
        return Err(ConfigError::Missing("deploy.image".to_string()).into());
    }
    validate_container_name(&deploy.container)?;
    for (key, port) in [
        ("deploy.host_port", deploy.host_port),
        ("deploy.container_port", deploy.container_port),
    ] {
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: port.to_string(),
                hint: "Ports must be between 1 and 65535".to_string(),
            }
            .into());
        }
    }
    if let Some(mount) = deploy.mounts.iter().find(|m| !m.container.starts_with('/')) {
        return Err(ConfigError::InvalidValue {
            key: "deploy.mounts".to_string(),
            value: mount.container.clone(),
            hint: "Container paths must be absolute".to_string(),
        }
        .into());
    }
    if deploy.liveness.attempts == 0 {
        return Err(ConfigError::InvalidValue {
            key: "deploy.liveness.attempts".to_string(),
            value: "0".to_string(),
            hint: "At least one liveness check is required".to_string(),
        }
        .into());
    }
    let bootstrap = &config.bootstrap;
    if bootstrap.interpreter.trim().is_empty() {
        return Err(ConfigError::Missing("bootstrap.interpreter".to_string()).into());
    }
    if bootstrap.env_dir.trim().is_empty() {
        return Err(ConfigError::Missing("bootstrap.env_dir".to_string()).into());
    }
    bootstrap.plan(Path::new("."))?;
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
