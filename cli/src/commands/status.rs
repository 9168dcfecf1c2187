//! `tubedeck status`: show the app container state.

use anyhow::Result;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::services::instance;

/// Run `tubedeck status`.
///
/// # Errors
///
/// Returns an error if the container runtime cannot be queried.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let status = instance::status(&app.runtime, &config.deploy.target()).await?;
    app.renderer().render_status(&status)?;
    Ok(ExitCode::SUCCESS)
}
