//! Instance operations shared by deploy, stop, status and logs.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::{InstanceInspector, InstanceLifecycle};
use crate::domain::{DeployError, DeploymentTarget, InstanceState, InstanceStatus};

/// Get the current state of the named instance.
///
/// A non-zero exit from the inspector means the instance does not exist.
///
/// # Errors
///
/// Returns an error if the runtime CLI cannot be executed at all.
pub async fn state(rt: &impl InstanceInspector, name: &str) -> Result<InstanceState> {
    let output = rt
        .inspect(name)
        .await
        .with_context(|| format!("querying state of instance '{name}'"))?;
    if !output.status.success() {
        return Ok(InstanceState::NotFound);
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let state = InstanceState::parse(stdout.lines().next().unwrap_or(""));
    tracing::debug!(name, %state, "instance state");
    Ok(state)
}

/// Snapshot of the target's instance for display.
///
/// # Errors
///
/// Returns an error if the runtime CLI cannot be executed at all.
pub async fn status(rt: &impl InstanceInspector, target: &DeploymentTarget) -> Result<InstanceStatus> {
    let current = state(rt, &target.container).await?;
    Ok(InstanceStatus::new(target, current))
}

/// Stop the instance if it is active, then remove it if it exists.
///
/// Returns `true` when an instance was removed.
///
/// # Errors
///
/// Returns an error if stopping or removing fails.
pub async fn stop_and_remove(
    rt: &(impl InstanceInspector + InstanceLifecycle),
    name: &str,
) -> Result<bool> {
    let current = state(rt, name).await?;
    if current.is_active() {
        let output = rt.stop(name).await.context("stopping instance")?;
        if !output.status.success() {
            return Err(DeployError::StopFailed {
                name: name.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
    }
    if !current.exists() {
        return Ok(false);
    }
    let output = rt.remove(name).await.context("removing instance")?;
    if !output.status.success() {
        return Err(DeployError::RemoveFailed {
            name: name.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }
    Ok(true)
}

/// Fetch instance logs as text, stdout followed by stderr.
///
/// # Errors
///
/// Returns an error if the runtime cannot be executed or reports failure.
pub async fn logs(rt: &impl InstanceInspector, name: &str, tail: Option<u32>) -> Result<String> {
    let output = rt
        .logs(name, tail)
        .await
        .with_context(|| format!("fetching logs of instance '{name}'"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to fetch logs for '{name}': {}", stderr.trim());
    }
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}
