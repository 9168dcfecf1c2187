//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::ToolConfig;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV: &str = "TUBEDECK_CONFIG";

/// File name looked up in the project directory.
pub const PROJECT_CONFIG_FILE: &str = "tubedeck.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file on disk.
///
/// Lookup order: `$TUBEDECK_CONFIG`, `./tubedeck.yaml` in the project
/// directory, then `<config dir>/tubedeck/config.yaml`. When none exists the
/// built-in defaults apply.
pub struct YamlConfigStore {
    project_dir: PathBuf,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(project_dir: PathBuf) -> Self {
        Self { project_dir }
    }

    fn candidates(&self) -> Vec<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return vec![PathBuf::from(val)];
        }
        let mut paths = vec![self.project_dir.join(PROJECT_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tubedeck").join("config.yaml"));
        }
        paths
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ToolConfig> {
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(val);
            if !path.exists() {
                anyhow::bail!("{CONFIG_ENV} points to {} which does not exist", path.display());
            }
        }
        let Some(path) = self.path() else {
            tracing::debug!("no configuration file found, using defaults");
            return Ok(ToolConfig::default());
        };
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(ToolConfig::default());
        }
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|p| p.exists())
    }
}
