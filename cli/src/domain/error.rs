//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Errors raised by the build-and-run workflow.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Image build failed for '{image}' (exit code {code}). No instance was replaced.")]
    BuildFailed { image: String, code: String },

    #[error("Failed to stop instance '{name}': {stderr}")]
    StopFailed { name: String, stderr: String },

    #[error("Failed to remove instance '{name}': {stderr}")]
    RemoveFailed { name: String, stderr: String },

    #[error("Failed to launch instance '{name}': {stderr}")]
    LaunchFailed { name: String, stderr: String },

    #[error(
        "Instance '{name}' is not running ({state}) after the grace period.\n\nDiagnose: tubedeck doctor\nView logs: tubedeck logs"
    )]
    LivenessFailed {
        name: String,
        state: String,
        /// Full log history captured when the check failed; empty if unavailable.
        logs: String,
    },

    #[error("No instance named '{0}'. Create one: tubedeck deploy")]
    NotFound(String),
}

// ── Bootstrap errors ──────────────────────────────────────────────────────────

/// Errors raised by the environment bootstrap workflow.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Interpreter '{0}' not found. Install Python and retry.")]
    InterpreterMissing(String),

    #[error("Cannot determine interpreter version from: {0}")]
    UnparsableVersion(String),

    #[error("Python {found} is installed but {required} or newer is required.")]
    InterpreterTooOld { found: String, required: String },

    #[error("Dependency manifest '{0}' not found.")]
    MissingManifest(String),

    #[error("Bootstrap step '{step}' failed (exit code {code}).")]
    StepFailed { step: String, code: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },

    #[error("Missing value for {0}")]
    Missing(String),
}

/// Render an optional exit code the way the workflows report it.
#[must_use]
pub fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}
