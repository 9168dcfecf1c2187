//! `tubedeck logs`: print the app container logs.

use anyhow::Result;
use clap::Args;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::instance;
use crate::domain::DeployError;
use crate::output::JsonRenderer;

/// Arguments for the logs command.
#[derive(Args)]
pub struct LogsArgs {
    /// Show only the last N lines
    #[arg(long, value_name = "N")]
    pub tail: Option<u32>,
}

/// Run `tubedeck logs`.
///
/// # Errors
///
/// Returns an error if the instance does not exist or its logs cannot be read.
pub async fn run(app: &AppContext, args: &LogsArgs) -> Result<ExitCode> {
    let config = app.load_config()?;
    let name = config.deploy.container;

    if !instance::state(&app.runtime, &name).await?.exists() {
        return Err(DeployError::NotFound(name).into());
    }
    let text = instance::logs(&app.runtime, &name, args.tail).await?;
    if app.is_json() {
        JsonRenderer::render_value(&serde_json::json!({ "container": name, "logs": text }))?;
    } else {
        print!("{text}");
    }
    Ok(ExitCode::SUCCESS)
}
