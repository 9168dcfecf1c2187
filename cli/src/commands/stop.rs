//! `tubedeck stop`: stop and remove the app container.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::instance;
use crate::output::JsonRenderer;

/// Run `tubedeck stop`.
///
/// # Errors
///
/// Returns an error if the instance cannot be stopped or removed.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let name = config.deploy.container;
    let ctx = &app.output;

    let state = instance::state(&app.runtime, &name).await?;
    if !state.exists() {
        if app.is_json() {
            JsonRenderer::render_value(&serde_json::json!({ "container": name, "removed": false }))?;
        } else {
            ctx.info(&format!("No instance named '{name}' to stop."));
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !app.confirm(&format!("Stop and remove '{name}' ({state})?"), true)? {
        ctx.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    ctx.step(&format!("stopping '{name}'..."));
    let removed = instance::stop_and_remove(&app.runtime, &name).await?;
    if app.is_json() {
        JsonRenderer::render_value(&serde_json::json!({ "container": name, "removed": removed }))?;
    } else {
        ctx.success(&format!("Instance '{name}' stopped and removed."));
        ctx.info("Downloads and logs on the host are preserved.");
    }
    Ok(ExitCode::SUCCESS)
}
