//! `tubedeck deploy`: build the image and (re)launch the app container.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::deploy::{self, DeployOptions};
use crate::domain::DeployOutcome;
use crate::infra::fs::HostFs;
use crate::output::progress::SpinnerSleeper;
use crate::output::{JsonRenderer, TerminalReporter};

/// Run `tubedeck deploy`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any deploy step fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let target = config.deploy.target();
    let liveness = config.deploy.liveness.policy();
    let reporter = TerminalReporter::new(&app.output);
    let sleeper = SpinnerSleeper::new(app.output.show_progress());

    app.output.header(&format!("Deploying {}", target.app_name));
    let DeployOutcome::Verified { replaced } = deploy::deploy(
        &app.runtime,
        &HostFs,
        &sleeper,
        &reporter,
        DeployOptions {
            target: &target,
            project_dir: &app.project_dir,
            liveness: &liveness,
        },
    )
    .await?;

    if app.is_json() {
        JsonRenderer::render_value(&serde_json::json!({
            "status": "running",
            "container": target.container,
            "image": target.image,
            "url": target.url(),
            "replaced": replaced,
        }))?;
    } else {
        app.output.info(&format!("Open: {}", target.url()));
        app.output.info("Stop: tubedeck stop");
    }
    Ok(ExitCode::SUCCESS)
}
