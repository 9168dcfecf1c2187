//! Application service: doctor use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use anyhow::Result;

use crate::application::ports::{InstanceInspector, LocalFs, ProgressReporter, Toolchain};
use crate::domain::BootstrapPlan;
use crate::domain::health::{
    DOCKER_MIN_VERSION, DoctorChecks, EnvironmentChecks, RuntimeChecks, parse_docker_version,
};
use crate::domain::version::extract_version;

/// Run the doctor probe workflow.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. Rendering is the caller's responsibility.
///
/// # Errors
///
/// Returns an error if a probe fails for a reason other than a missing tool.
pub async fn run_doctor(
    runtime: &impl InstanceInspector,
    toolchain: &impl Toolchain,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<DoctorChecks> {
    reporter.step("checking container runtime...");
    let runtime_checks = probe_runtime(runtime).await;

    reporter.step("checking development environment...");
    let environment = probe_environment(toolchain, fs, plan).await;

    reporter.success("diagnostics complete");
    Ok(DoctorChecks {
        runtime: runtime_checks,
        environment,
    })
}

// ── Internal probes ───────────────────────────────────────────────────────────

async fn probe_runtime(runtime: &impl InstanceInspector) -> RuntimeChecks {
    let Ok(output) = runtime.version().await else {
        return RuntimeChecks {
            docker_found: false,
            docker_version: None,
            docker_version_ok: false,
            daemon_reachable: false,
        };
    };
    let version = parse_docker_version(&String::from_utf8_lossy(&output.stdout));
    let docker_version_ok = version.as_ref().is_none_or(|v| *v >= DOCKER_MIN_VERSION);
    let daemon_reachable = runtime
        .info()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false);
    RuntimeChecks {
        docker_found: output.status.success(),
        docker_version: version.map(|v| v.to_string()),
        docker_version_ok,
        daemon_reachable,
    }
}

async fn probe_environment(
    toolchain: &impl Toolchain,
    fs: &impl LocalFs,
    plan: &BootstrapPlan,
) -> EnvironmentChecks {
    let version = match toolchain.interpreter_version().await {
        Ok(out) if out.status.success() => {
            let mut banner = String::from_utf8_lossy(&out.stdout).into_owned();
            banner.push_str(&String::from_utf8_lossy(&out.stderr));
            Some(extract_version(&banner).ok())
        }
        _ => None,
    };
    let interpreter_found = version.is_some();
    let version = version.flatten();
    EnvironmentChecks {
        interpreter_found,
        interpreter_version_ok: version
            .as_ref()
            .is_some_and(|v| v.satisfies(&plan.min_version)),
        interpreter_version: version.map(|v| v.to_string()),
        required_version: plan.min_version.to_string(),
        manifest_present: fs.exists(&plan.manifest_path()),
        hook_config_present: fs.exists(&plan.hook_config_path()),
    }
}
