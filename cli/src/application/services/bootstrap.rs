//! Application service: environment bootstrap use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::process::ExitStatus;

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, ProgressReporter, SystemPackageManager, Toolchain};
use crate::domain::bootstrap::{is_shell_script, parse_requirements};
use crate::domain::error::describe_code;
use crate::domain::version::extract_version;
use crate::domain::{BootstrapError, BootstrapPlan, InterpreterVersion};

/// Hook manager installed when the hook configuration is present.
const HOOK_TOOL: &str = "pre-commit";

/// Summary of a completed bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub interpreter_version: String,
    pub system_packages_installed: bool,
    pub requirements: usize,
    pub scripts_normalized: usize,
    pub hooks_installed: bool,
}

/// Prepare the development environment described by `plan`.
///
/// Steps run in order and the first failure aborts the whole bootstrap
/// without cleaning up what earlier steps created.
///
/// # Errors
///
/// Returns a `BootstrapError` for the failing step, or an I/O error if a tool
/// cannot be executed.
pub async fn bootstrap(
    toolchain: &impl Toolchain,
    packages: &impl SystemPackageManager,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<BootstrapOutcome> {
    // Step 1: Version precondition.
    reporter.step("checking interpreter version...");
    let version = check_interpreter(toolchain, plan).await?;
    reporter.success(&format!("Python {version} found"));

    // Step 2: Isolated environment.
    reporter.step(&format!("creating isolated environment in {}...", plan.env_dir));
    ensure_step("create environment", toolchain.create_env().await?)?;
    reporter.success("isolated environment created");

    // Step 3: Dependencies.
    reporter.step("upgrading pip...");
    ensure_step(
        "upgrade pip",
        toolchain
            .run_python(&["-m", "pip", "install", "--upgrade", "pip"])
            .await?,
    )?;

    let system_packages_installed = install_system_packages(packages, reporter, plan).await?;

    let requirements = install_requirements(toolchain, fs, reporter, plan).await?;
    reporter.success(&format!("{requirements} dependencies installed"));

    // Step 4: Working directories.
    reporter.step("creating working directories...");
    for dir in plan.directory_paths() {
        fs.create_dir_all(&dir)?;
    }
    reporter.success(&format!("directories ready: {}", plan.directories.join(", ")));

    // Step 5: Script permissions.
    let scripts_normalized = normalize_scripts(fs, plan)?;

    // Step 6: Optional hooks.
    let hooks_installed = install_hooks(toolchain, fs, reporter, plan).await?;

    // Step 7: Validation.
    reporter.step("running test suite...");
    let mut args = vec!["-m", "pytest"];
    args.extend(plan.test_args.iter().map(String::as_str));
    ensure_step("test suite", toolchain.run_python(&args).await?)?;
    reporter.success("test suite passed");

    tracing::info!(%version, requirements, hooks_installed, "bootstrap complete");
    Ok(BootstrapOutcome {
        interpreter_version: version.to_string(),
        system_packages_installed,
        requirements,
        scripts_normalized,
        hooks_installed,
    })
}

/// Read the interpreter version and compare it with the plan's minimum.
///
/// # Errors
///
/// Returns `InterpreterMissing`, `UnparsableVersion` or `InterpreterTooOld`.
pub async fn check_interpreter(
    toolchain: &impl Toolchain,
    plan: &BootstrapPlan,
) -> Result<InterpreterVersion> {
    let output = toolchain
        .interpreter_version()
        .await
        .map_err(|_| BootstrapError::InterpreterMissing(plan.interpreter.clone()))?;
    if !output.status.success() {
        return Err(BootstrapError::InterpreterMissing(plan.interpreter.clone()).into());
    }
    let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
    banner.push_str(&String::from_utf8_lossy(&output.stderr));
    let version = extract_version(&banner)?;
    if !version.satisfies(&plan.min_version) {
        return Err(BootstrapError::InterpreterTooOld {
            found: version.to_string(),
            required: plan.min_version.to_string(),
        }
        .into());
    }
    Ok(version)
}

async fn install_system_packages(
    packages: &impl SystemPackageManager,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<bool> {
    if plan.system_packages.is_empty() {
        return Ok(false);
    }
    if !packages.is_available().await {
        reporter.warn(&format!(
            "no system package manager found; install manually: {}",
            plan.system_packages.join(" ")
        ));
        return Ok(false);
    }
    reporter.step(&format!(
        "installing system packages: {}...",
        plan.system_packages.join(" ")
    ));
    ensure_step("update package index", packages.update_index().await?)?;
    ensure_step(
        "install system packages",
        packages.install(&plan.system_packages).await?,
    )?;
    Ok(true)
}

async fn install_requirements(
    toolchain: &impl Toolchain,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<usize> {
    let manifest = plan.manifest_path();
    if !fs.exists(&manifest) {
        return Err(BootstrapError::MissingManifest(plan.manifest.clone()).into());
    }
    let count = parse_requirements(&fs.read_to_string(&manifest)?).len();
    reporter.step(&format!("installing dependencies from {}...", plan.manifest));
    let manifest_str = manifest
        .to_str()
        .context("manifest path is not valid UTF-8")?;
    ensure_step(
        "install dependencies",
        toolchain
            .run_python(&["-m", "pip", "install", "-r", manifest_str])
            .await?,
    )?;
    Ok(count)
}

fn normalize_scripts(fs: &impl LocalFs, plan: &BootstrapPlan) -> Result<usize> {
    let scripts = plan.scripts_path();
    if !fs.exists(&scripts) {
        return Ok(0);
    }
    let mut count = 0;
    for path in fs.list_dir(&scripts)? {
        if is_shell_script(&path) {
            fs.make_executable(&path)?;
            count += 1;
        }
    }
    Ok(count)
}

async fn install_hooks(
    toolchain: &impl Toolchain,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    plan: &BootstrapPlan,
) -> Result<bool> {
    if !fs.exists(&plan.hook_config_path()) {
        return Ok(false);
    }
    reporter.step("installing commit hooks...");
    ensure_step(
        "install hook manager",
        toolchain
            .run_python(&["-m", "pip", "install", HOOK_TOOL])
            .await?,
    )?;
    ensure_step(
        "register hooks",
        toolchain.run_tool(HOOK_TOOL, &["install"]).await?,
    )?;
    reporter.success("commit hooks installed");
    Ok(true)
}

fn ensure_step(step: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(BootstrapError::StepFailed {
        step: step.to_string(),
        code: describe_code(status.code()),
    }
    .into())
}
