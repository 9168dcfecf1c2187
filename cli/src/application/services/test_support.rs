//! Shared test helpers for service tests.
//!
//! Provides cross-platform `exit_status()`, canned outputs, and recording
//! implementations of the reporter, sleeper and filesystem ports.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{LocalFs, ProgressReporter, Sleeper};

/// Build an `ExitStatus` from a logical exit code (cross-platform).
#[cfg(unix)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    std::process::ExitStatus::from_raw(code as u32)
}

pub fn ok_output(stdout: &[u8]) -> std::process::Output {
    std::process::Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn fail_output() -> std::process::Output {
    std::process::Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Reporter that records every event as `"<kind>: <message>"`.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn contains(&self, needle: &str) -> bool {
        self.events.borrow().iter().any(|e| e.contains(needle))
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.events.borrow_mut().push(format!("step: {message}"));
    }
    fn success(&self, message: &str) {
        self.events.borrow_mut().push(format!("success: {message}"));
    }
    fn warn(&self, message: &str) {
        self.events.borrow_mut().push(format!("warn: {message}"));
    }
    fn logs(&self, heading: &str, body: &str) {
        self.events
            .borrow_mut()
            .push(format!("logs: {heading}\n{body}"));
    }
}

/// Sleeper that returns immediately and records requested durations.
#[derive(Default)]
pub struct InstantSleeper {
    pub slept: RefCell<Vec<Duration>>,
}

impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// In-memory filesystem: a set of existing paths plus recorded chmods.
///
/// Files read back as empty unless given contents with `write`.
#[derive(Default)]
pub struct MemFs {
    pub paths: RefCell<BTreeSet<PathBuf>>,
    pub contents: RefCell<BTreeMap<PathBuf, String>>,
    pub executables: RefCell<Vec<PathBuf>>,
}

impl MemFs {
    pub fn with_files(files: &[&str]) -> Self {
        let fs = Self::default();
        for f in files {
            fs.paths.borrow_mut().insert(PathBuf::from(f));
        }
        fs
    }

    pub fn write(&self, path: &str, content: &str) {
        self.paths.borrow_mut().insert(PathBuf::from(path));
        self.contents
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
    }
}

impl LocalFs for MemFs {
    fn exists(&self, path: &Path) -> bool {
        self.paths.borrow().iter().any(|p| p.starts_with(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.paths.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        if !self.paths.borrow().contains(path) {
            anyhow::bail!("{} not found", path.display());
        }
        Ok(self.contents.borrow().get(path).cloned().unwrap_or_default())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .paths
            .borrow()
            .iter()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect())
    }

    fn make_executable(&self, path: &Path) -> Result<()> {
        self.executables.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
