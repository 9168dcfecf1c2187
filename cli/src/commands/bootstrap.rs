//! `tubedeck bootstrap`: prepare the local development environment.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::bootstrap;
use crate::infra::apt::AptPackageManager;
use crate::infra::fs::HostFs;
use crate::infra::python::PythonToolchain;
use crate::output::{JsonRenderer, TerminalReporter};

/// Run `tubedeck bootstrap`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the interpreter is too
/// old, or any bootstrap step fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let plan = config.bootstrap.plan(&app.project_dir)?;
    let toolchain = PythonToolchain::for_plan(&plan);
    let packages = AptPackageManager::default_runner();
    let reporter = TerminalReporter::new(&app.output);

    app.output.header("Bootstrapping development environment");
    let outcome = bootstrap::bootstrap(&toolchain, &packages, &HostFs, &reporter, &plan).await?;

    if app.is_json() {
        JsonRenderer::render_value(&serde_json::json!({
            "status": "ready",
            "interpreter_version": outcome.interpreter_version,
            "env_dir": plan.env_path().display().to_string(),
            "system_packages_installed": outcome.system_packages_installed,
            "requirements": outcome.requirements,
            "scripts_normalized": outcome.scripts_normalized,
            "hooks_installed": outcome.hooks_installed,
        }))?;
    } else {
        app.output.success("Development environment ready");
        app.output
            .info(&format!("Activate: source {}/bin/activate", plan.env_dir));
        app.output.info("Deploy: tubedeck deploy");
    }
    Ok(ExitCode::SUCCESS)
}
