//! Human-readable terminal renderer.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::domain::health::DOCKER_MIN_VERSION;
use crate::domain::{DoctorChecks, InstanceState, InstanceStatus, ToolConfig};
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("tubedeck {version}");
    }

    /// Render the instance status.
    pub fn render_status(&self, status: &InstanceStatus) {
        self.ctx.kv("Instance:", &status.name);
        self.ctx.kv("Image:   ", &status.image);
        self.ctx.kv("State:   ", state_display(status.state));
        if let Some(url) = &status.url {
            self.ctx.kv("URL:     ", url);
        }
        if !status.state.is_active() {
            println!();
            self.ctx.info("Run: tubedeck deploy");
        }
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized.
    pub fn render_config(&self, config: &ToolConfig, path: Option<&Path>) -> Result<()> {
        let source = path.map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string());
        println!();
        println!(
            "  {}",
            format!("Configuration ({source})").style(self.ctx.styles.header)
        );
        println!();
        let yaml = serde_yaml::to_string(config).context("cannot serialize config")?;
        for line in yaml.lines() {
            println!("  {line}");
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<18} {}",
            format!("{CONFIG_ENV}:"),
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<18} {}",
            "NO_COLOR:",
            std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
        Ok(())
    }

    /// Render doctor health check results.
    pub fn render_doctor(&self, checks: &DoctorChecks, issues: &[String]) {
        println!();
        println!("  {}", "Tubedeck Health Check".style(self.ctx.styles.header));
        println!();

        println!("  Container runtime:");
        let rt = &checks.runtime;
        if rt.docker_found {
            let ver = rt.docker_version.as_deref().unwrap_or("unknown");
            self.print_check(
                rt.docker_version_ok,
                &format!("Docker {ver} (need \u{2265} {DOCKER_MIN_VERSION})"),
            );
            self.print_check(rt.daemon_reachable, "Docker daemon reachable");
        } else {
            self.print_check(false, "docker not found");
            println!("      Install: https://docs.docker.com/get-docker/");
        }
        println!();

        println!("  Development environment:");
        let env = &checks.environment;
        if env.interpreter_found {
            let ver = env.interpreter_version.as_deref().unwrap_or("unknown");
            self.print_check(
                env.interpreter_version_ok,
                &format!("Python {ver} (need \u{2265} {})", env.required_version),
            );
        } else {
            self.print_check(false, "python interpreter not found");
        }
        self.print_check(env.manifest_present, "dependency manifest present");
        if env.hook_config_present {
            self.print_check(true, "commit hook configuration present");
        } else {
            println!(
                "    {} no commit hook configuration (hooks will be skipped)",
                "\u{2139}".style(self.ctx.styles.info)
            );
        }

        println!();
        if issues.is_empty() {
            println!(
                "  {} Everything looks good!",
                "\u{2713}".style(self.ctx.styles.success)
            );
        } else {
            println!(
                "  {} Found {} {}:",
                "\u{2717}".style(self.ctx.styles.error),
                issues.len(),
                if issues.len() == 1 { "issue" } else { "issues" },
            );
            for issue in issues {
                println!("    {} {issue}", "\u{2717}".style(self.ctx.styles.error));
            }
        }
        println!();
    }

    fn print_check(&self, ok: bool, msg: &str) {
        if ok {
            println!("    {} {msg}", "\u{2713}".style(self.ctx.styles.success));
        } else {
            println!("    {} {msg}", "\u{2717}".style(self.ctx.styles.error));
        }
    }
}

// ── Display helpers (used by tests and output layer) ─────────────────────────

#[must_use]
pub fn state_display(state: InstanceState) -> &'static str {
    match state {
        InstanceState::Running => "running",
        InstanceState::Restarting => "restarting",
        InstanceState::Created => "created (not started)",
        InstanceState::Paused => "paused",
        InstanceState::Exited => "exited",
        InstanceState::Dead => "dead",
        InstanceState::NotFound => "not deployed",
    }
}
