//! Interpreter version parsing and ordering.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::BootstrapError;

#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("valid version regex"));

/// Dotted numeric version such as `3.9` or `3.10.4`.
///
/// Ordering is component-wise and numeric, with missing trailing components
/// treated as zero, so `3.10 > 3.9` and `3.9 == 3.9.0`.
#[derive(Debug, Clone)]
pub struct InterpreterVersion {
    parts: Vec<u64>,
}

impl InterpreterVersion {
    /// Build a version from its numeric components.
    #[must_use]
    pub fn new(parts: Vec<u64>) -> Self {
        Self { parts }
    }

    /// Numeric components as parsed.
    #[must_use]
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    /// Whether this version sorts at or above `minimum`.
    #[must_use]
    pub fn satisfies(&self, minimum: &Self) -> bool {
        self >= minimum
    }

    fn component(&self, idx: usize) -> u64 {
        self.parts.get(idx).copied().unwrap_or(0)
    }
}

impl FromStr for InterpreterVersion {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BootstrapError::UnparsableVersion(s.to_string()));
        }
        let parts = trimmed
            .split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| BootstrapError::UnparsableVersion(s.to_string()))?;
        Ok(Self { parts })
    }
}

impl PartialEq for InterpreterVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for InterpreterVersion {}

impl PartialOrd for InterpreterVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InterpreterVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for InterpreterVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .parts
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&text)
    }
}

/// Extract the version from `--version` output such as `Python 3.11.4`.
///
/// Both stdout and stderr are accepted by callers since older interpreters
/// print the banner on stderr.
///
/// # Errors
///
/// Returns `BootstrapError::UnparsableVersion` if no dotted number is present.
pub fn extract_version(output: &str) -> Result<InterpreterVersion, BootstrapError> {
    let found = VERSION_RE
        .find(output)
        .ok_or_else(|| BootstrapError::UnparsableVersion(output.trim().to_string()))?;
    found.as_str().parse()
}
