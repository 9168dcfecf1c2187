//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
/// - `logs()` prints a header and the indented log body (suppressed when `ctx.quiet`)
/// - `failure_logs()` prints the same block to stderr, regardless of `ctx.quiet`
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.ctx.step(message);
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }

    fn logs(&self, heading: &str, body: &str) {
        if self.ctx.quiet {
            return;
        }
        println!();
        println!("  {}", format!("{heading}:").style(self.ctx.styles.bold));
        print!("{}", indent_block(body));
        println!();
    }

    fn failure_logs(&self, heading: &str, body: &str) {
        eprintln!();
        eprintln!("  {}", format!("{heading}:").style(self.ctx.styles.bold));
        eprint!("{}", indent_block(body));
        eprintln!();
    }
}

/// Indent every line by four spaces; an empty body renders as `(no output)`.
#[must_use]
pub fn indent_block(body: &str) -> String {
    if body.trim().is_empty() {
        return "    (no output)\n".to_string();
    }
    body.lines().map(|l| format!("    {l}\n")).collect()
}
