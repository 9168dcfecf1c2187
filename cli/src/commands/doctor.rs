//! `tubedeck doctor`: diagnose deploy and bootstrap prerequisites.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::doctor;
use crate::domain::collect_issues;
use crate::infra::fs::HostFs;
use crate::infra::python::PythonToolchain;
use crate::output::progress::SpinnerReporter;

/// Run `tubedeck doctor`.
///
/// Exits with failure when any actionable issue is found.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or rendering fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let plan = config.bootstrap.plan(&app.project_dir)?;
    let toolchain = PythonToolchain::for_plan(&plan);

    let reporter = SpinnerReporter::new(app.output.show_progress(), "Running diagnostics...");
    let checks = doctor::run_doctor(&app.runtime, &toolchain, &HostFs, &reporter, &plan).await;
    reporter.finish();
    let checks = checks?;

    let issues = collect_issues(&checks);
    app.renderer().render_doctor(&checks, &issues)?;
    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
