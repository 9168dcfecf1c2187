//! Application service: build-and-run use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The workflow is strictly sequential: build, replace, launch, verify. Any
//! failing step returns early, so a failed build never touches the running
//! instance.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{
    ContainerRuntime, ImageBuilder, InstanceInspector, LaunchSpec, LocalFs, ProgressReporter,
    Sleeper,
};
use crate::application::services::instance;
use crate::domain::deploy::RESTART_POLICY;
use crate::domain::error::describe_code;
use crate::domain::{DeployError, DeployOutcome, DeploymentTarget, InstanceState, LivenessPolicy};

/// Inputs of a single deploy run.
pub struct DeployOptions<'a> {
    pub target: &'a DeploymentTarget,
    /// Build context and base of relative mount paths.
    pub project_dir: &'a Path,
    pub liveness: &'a LivenessPolicy,
}

/// Build the image, replace any existing instance, launch and verify.
///
/// # Errors
///
/// Returns `DeployError::BuildFailed`, `StopFailed`, `RemoveFailed`,
/// `LaunchFailed` or `LivenessFailed` for the step that failed, or an I/O
/// error if the runtime cannot be executed.
pub async fn deploy(
    runtime: &impl ContainerRuntime,
    fs: &impl LocalFs,
    sleeper: &impl Sleeper,
    reporter: &impl ProgressReporter,
    opts: DeployOptions<'_>,
) -> Result<DeployOutcome> {
    let DeployOptions {
        target,
        project_dir,
        liveness,
    } = opts;
    tracing::info!(image = %target.image, container = %target.container, "deploy starting");

    // Step 1: Build.
    reporter.step(&format!("building image {}...", target.image));
    build_image(runtime, &target.image, project_dir).await?;
    reporter.success(&format!("image {} built", target.image));

    // Step 2: Replace.
    reporter.step(&format!("checking for existing instance '{}'...", target.container));
    let replaced = instance::stop_and_remove(runtime, &target.container).await?;
    if replaced {
        reporter.success(&format!("previous instance '{}' removed", target.container));
    }

    // Step 3: Launch.
    prepare_mounts(fs, target, project_dir)?;
    reporter.step(&format!("launching instance '{}'...", target.container));
    let spec = LaunchSpec {
        target,
        project_dir,
        restart_policy: RESTART_POLICY,
    };
    let output = runtime.launch(&spec).await.context("launching instance")?;
    if !output.status.success() {
        return Err(DeployError::LaunchFailed {
            name: target.container.clone(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into());
    }

    // Step 4: Verify.
    verify_liveness(runtime, sleeper, reporter, &target.container, liveness).await?;
    reporter.success(&format!(
        "{} is running at {}",
        target.app_name,
        target.url()
    ));
    tracing::info!(container = %target.container, replaced, "deploy verified");
    Ok(DeployOutcome::Verified { replaced })
}

async fn build_image(builder: &impl ImageBuilder, image: &str, context: &Path) -> Result<()> {
    let status = builder
        .build(image, context)
        .await
        .context("running image build")?;
    if !status.success() {
        return Err(DeployError::BuildFailed {
            image: image.to_string(),
            code: describe_code(status.code()),
        }
        .into());
    }
    Ok(())
}

/// Create host-side mount directories so the runtime does not create them
/// owned by root.
fn prepare_mounts(fs: &impl LocalFs, target: &DeploymentTarget, project_dir: &Path) -> Result<()> {
    for mount in &target.mounts {
        fs.create_dir_all(&mount.host_path(project_dir))?;
    }
    Ok(())
}

/// Wait the grace period, then check the instance state.
///
/// On success the last `tail_lines` log lines are emitted, and a failure to
/// fetch them is only a warning. On failure the full log history is emitted
/// as failure output and carried in the returned error.
///
/// # Errors
///
/// Returns `DeployError::LivenessFailed` if the instance is not running after
/// every attempt.
pub async fn verify_liveness(
    rt: &impl InstanceInspector,
    sleeper: &impl Sleeper,
    reporter: &impl ProgressReporter,
    name: &str,
    policy: &LivenessPolicy,
) -> Result<()> {
    reporter.step(&format!(
        "waiting {}s before liveness check...",
        policy.grace_period.as_secs()
    ));
    sleeper.sleep(policy.grace_period).await;

    let mut last = InstanceState::NotFound;
    for attempt in 1..=policy.attempts {
        last = instance::state(rt, name).await?;
        if last.is_active() {
            match instance::logs(rt, name, Some(policy.tail_lines)).await {
                Ok(tail) => reporter.logs(&format!("Last {} log lines", policy.tail_lines), &tail),
                Err(e) => reporter.warn(&format!("could not fetch logs: {e}")),
            }
            return Ok(());
        }
        tracing::debug!(attempt, state = %last, "instance not active yet");
        if attempt < policy.attempts {
            sleeper.sleep(policy.interval).await;
        }
    }

    let logs = match instance::logs(rt, name, None).await {
        Ok(full) => {
            reporter.failure_logs("Full logs", &full);
            full
        }
        Err(e) => {
            reporter.warn(&format!("could not fetch logs: {e}"));
            String::new()
        }
    };
    Err(DeployError::LivenessFailed {
        name: name.to_string(),
        state: last.to_string(),
        logs,
    }
    .into())
}
