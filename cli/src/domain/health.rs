//! Health check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

/// Minimum container runtime version the deploy workflow is tested against.
pub const DOCKER_MIN_VERSION: semver::Version = semver::Version::new(20, 10, 0);

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// Container runtime checks (deploy prerequisites).
    pub runtime: RuntimeChecks,
    /// Interpreter and project checks (bootstrap prerequisites).
    pub environment: EnvironmentChecks,
}

/// Container runtime checks.
#[derive(Debug, Serialize)]
pub struct RuntimeChecks {
    /// Whether `docker` is on PATH.
    pub docker_found: bool,
    /// Installed client version (e.g. `"27.3.1"`), if found.
    pub docker_version: Option<String>,
    /// Whether the installed version meets the minimum.
    pub docker_version_ok: bool,
    /// Whether the daemon answered `docker info`.
    pub daemon_reachable: bool,
}

/// Interpreter and project layout checks.
#[derive(Debug, Serialize)]
pub struct EnvironmentChecks {
    /// Whether the interpreter could be executed.
    pub interpreter_found: bool,
    /// Interpreter version, if found.
    pub interpreter_version: Option<String>,
    /// Required minimum version.
    pub required_version: String,
    /// Whether the interpreter meets the minimum.
    pub interpreter_version_ok: bool,
    /// Whether the dependency manifest exists.
    pub manifest_present: bool,
    /// Whether the hook configuration exists (informational).
    pub hook_config_present: bool,
}

// ── Pure functions ────────────────────────────────────────────────────────────

/// Parse the first `major.minor.patch` token from `docker --version` output,
/// e.g. `Docker version 27.3.1, build ce12230`.
///
/// Older releases zero-pad the minor (`19.03.8`), which strict semver
/// rejects, so components are parsed individually.
#[must_use]
pub fn parse_docker_version(output: &str) -> Option<semver::Version> {
    output
        .split_whitespace()
        .map(|t| t.trim_end_matches(','))
        .find_map(|t| {
            let core = t.split(['-', '+']).next()?;
            let mut nums = core.split('.').map(|p| p.parse::<u64>().ok());
            let (major, minor, patch) = (nums.next()??, nums.next()??, nums.next()??);
            Some(semver::Version::new(major, minor, patch))
        })
}

/// Collect actionable issues from check results.
///
/// A missing hook configuration is informational and never reported here.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let mut issues = Vec::new();
    let rt = &checks.runtime;
    if !rt.docker_found {
        issues.push("docker is not installed".to_string());
    } else {
        if !rt.docker_version_ok {
            let ver = rt.docker_version.as_deref().unwrap_or("unknown");
            issues.push(format!("Docker {ver} is too old (need ≥ {DOCKER_MIN_VERSION})"));
        }
        if !rt.daemon_reachable {
            issues.push("docker daemon is not reachable".to_string());
        }
    }
    let env = &checks.environment;
    if !env.interpreter_found {
        issues.push("python interpreter is not installed".to_string());
    } else if !env.interpreter_version_ok {
        let ver = env.interpreter_version.as_deref().unwrap_or("unknown");
        issues.push(format!(
            "Python {ver} is too old (need ≥ {})",
            env.required_version
        ));
    }
    if !env.manifest_present {
        issues.push("dependency manifest is missing".to_string());
    }
    issues
}
