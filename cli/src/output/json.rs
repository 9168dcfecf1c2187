//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed object on
//! stdout, including the error object emitted by `main` when a command fails.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{
    BootstrapError, ConfigError, DeployError, DoctorChecks, InstanceStatus, ToolConfig,
};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    serde_json::to_string_pretty(&error_object(message, code))
        .context("JSON serialization failed")
}

fn error_object(message: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    })
}

/// Format the JSON error object for a failed command.
///
/// Same schema as [`format_error`], plus a `logs` string when the failure
/// captured instance logs (a failed liveness check).
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_command_error(err: &anyhow::Error) -> Result<String> {
    let mut obj = error_object(&format!("{err:#}"), error_code(err));
    let logs = err.chain().find_map(|cause| match cause.downcast_ref::<DeployError>() {
        Some(DeployError::LivenessFailed { logs, .. }) => Some(logs.clone()),
        _ => None,
    });
    if let Some(logs) = logs {
        obj["logs"] = serde_json::Value::String(logs);
    }
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for an error, derived from its domain type.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DeployError>() {
            return match e {
                DeployError::BuildFailed { .. } => "build_failed",
                DeployError::StopFailed { .. } | DeployError::RemoveFailed { .. } => {
                    "replace_failed"
                }
                DeployError::LaunchFailed { .. } => "launch_failed",
                DeployError::LivenessFailed { .. } => "liveness_failed",
                DeployError::NotFound(_) => "not_found",
            };
        }
        if let Some(e) = cause.downcast_ref::<BootstrapError>() {
            return match e {
                BootstrapError::InterpreterMissing(_) => "interpreter_missing",
                BootstrapError::UnparsableVersion(_) | BootstrapError::InterpreterTooOld { .. } => {
                    "interpreter_version"
                }
                BootstrapError::MissingManifest(_) => "missing_manifest",
                BootstrapError::StepFailed { .. } => "step_failed",
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "invalid_config";
        }
    }
    "error"
}

/// Stateless JSON renderer.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Print the instance status object.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_status(status: &InstanceStatus) -> Result<()> {
        Self::print(status)
    }

    /// Print doctor checks together with the derived issue list.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_doctor(checks: &DoctorChecks, issues: &[String]) -> Result<()> {
        Self::print(&doctor_value(checks, issues)?)
    }

    /// Print the effective configuration and its source path.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(config: &ToolConfig, path: Option<&Path>) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path.map(|p| p.display().to_string()),
            "config": config,
        }))
    }

    /// Print `{"version": "..."}`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// Print an arbitrary serializable result object.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_value(value: &serde_json::Value) -> Result<()> {
        Self::print(value)
    }
}

/// Doctor JSON document: `{"status": "healthy"|"unhealthy", "checks": ..., "issues": [...]}`.
///
/// # Errors
///
/// Returns an error if the checks cannot be serialized.
pub fn doctor_value(checks: &DoctorChecks, issues: &[String]) -> Result<serde_json::Value> {
    let status = if issues.is_empty() { "healthy" } else { "unhealthy" };
    Ok(serde_json::json!({
        "status": status,
        "checks": serde_json::to_value(checks).context("JSON serialization failed")?,
        "issues": issues,
    }))
}
