//! Bootstrap domain types: the environment layout and manifest parsing.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use std::path::{Path, PathBuf};

use crate::domain::version::InterpreterVersion;

/// Resolved bootstrap plan for one project directory.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    /// Project root; every relative path below is joined onto it.
    pub project_dir: PathBuf,
    /// Interpreter used to create the isolated environment (e.g. `python3`).
    pub interpreter: String,
    /// Minimum accepted interpreter version.
    pub min_version: InterpreterVersion,
    /// Isolated environment directory (e.g. `venv`).
    pub env_dir: String,
    /// Language-level dependency manifest (e.g. `requirements.txt`).
    pub manifest: String,
    /// System packages installed when a system package manager is present.
    pub system_packages: Vec<String>,
    /// Working directories created idempotently.
    pub directories: Vec<String>,
    /// Directory whose `*.sh` files are marked executable.
    pub scripts_dir: String,
    /// Hook configuration whose presence enables hook installation.
    pub hook_config: String,
    /// Arguments passed to `python -m pytest`.
    pub test_args: Vec<String>,
}

impl BootstrapPlan {
    #[must_use]
    pub fn env_path(&self) -> PathBuf {
        self.project_dir.join(&self.env_dir)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(&self.manifest)
    }

    #[must_use]
    pub fn scripts_path(&self) -> PathBuf {
        self.project_dir.join(&self.scripts_dir)
    }

    #[must_use]
    pub fn hook_config_path(&self) -> PathBuf {
        self.project_dir.join(&self.hook_config)
    }

    /// Working directory paths in declaration order.
    #[must_use]
    pub fn directory_paths(&self) -> Vec<PathBuf> {
        self.directories
            .iter()
            .map(|d| self.project_dir.join(d))
            .collect()
    }
}

/// Declared requirement lines: non-empty, non-comment entries.
#[must_use]
pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Whether a path names a shell script to normalise.
#[must_use]
pub fn is_shell_script(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "sh")
}

/// Permission bits with execute added wherever read is set.
#[must_use]
pub fn executable_mode(mode: u32) -> u32 {
    mode | ((mode & 0o444) >> 2)
}
