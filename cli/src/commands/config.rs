//! `tubedeck config`: inspect the effective configuration.

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::output::JsonRenderer;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the configuration file in use
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or is invalid.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Path => show_path(app),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let path = app.config_store.path();
    app.renderer().render_config(&config, path.as_deref())?;
    Ok(ExitCode::SUCCESS)
}

fn show_path(app: &AppContext) -> Result<ExitCode> {
    let path = app.config_store.path();
    if app.is_json() {
        JsonRenderer::render_value(&serde_json::json!({
            "path": path.as_ref().map(|p| p.display().to_string()),
        }))?;
    } else {
        match path {
            Some(p) => println!("{}", p.display()),
            None => println!("(defaults)"),
        }
    }
    Ok(ExitCode::SUCCESS)
}
