//! Shared mock infrastructure for unit tests.
//!
//! Provides a stateful fake container runtime, a scripted Python toolchain,
//! package manager stubs and output helpers so each test file doesn't have
//! to re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::time::Duration;

use anyhow::Result;
use tubedeck_cli::application::ports::{
    ImageBuilder, InstanceInspector, InstanceLifecycle, LaunchSpec, ProgressReporter, Sleeper,
    SystemPackageManager, Toolchain,
};
use tubedeck_cli::domain::InstanceState;

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: status(1),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Fake docker ───────────────────────────────────────────────────────────────

/// Container runtime that keeps a registry of named instances in memory.
///
/// `launch` registers the instance as running, or as exited when
/// `crash_on_start` is set. Every call is recorded as `"<verb> <name>"`.
pub struct FakeDocker {
    pub build_code: i32,
    pub crash_on_start: bool,
    pub instances: RefCell<BTreeMap<String, InstanceState>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeDocker {
    pub fn new() -> Self {
        Self {
            build_code: 0,
            crash_on_start: false,
            instances: RefCell::new(BTreeMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_instance(self, name: &str, state: InstanceState) -> Self {
        self.instances.borrow_mut().insert(name.to_string(), state);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, verb: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.split(' ').next() == Some(verb))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ImageBuilder for FakeDocker {
    async fn build(&self, image: &str, _context: &Path) -> Result<ExitStatus> {
        self.record(format!("build {image}"));
        Ok(status(self.build_code))
    }
}

impl InstanceLifecycle for FakeDocker {
    async fn launch(&self, spec: &LaunchSpec<'_>) -> Result<Output> {
        let name = &spec.target.container;
        self.record(format!("run {name}"));
        let mut instances = self.instances.borrow_mut();
        if instances.contains_key(name) {
            return Ok(err_output(b"Conflict. The container name is already in use"));
        }
        let state = if self.crash_on_start {
            InstanceState::Exited
        } else {
            InstanceState::Running
        };
        instances.insert(name.clone(), state);
        Ok(ok_output(b"0123456789ab\n"))
    }

    async fn stop(&self, name: &str) -> Result<Output> {
        self.record(format!("stop {name}"));
        if let Some(state) = self.instances.borrow_mut().get_mut(name) {
            *state = InstanceState::Exited;
            return Ok(ok_output(b""));
        }
        Ok(err_output(b"No such container"))
    }

    async fn remove(&self, name: &str) -> Result<Output> {
        self.record(format!("rm {name}"));
        if self.instances.borrow_mut().remove(name).is_some() {
            return Ok(ok_output(b""));
        }
        Ok(err_output(b"No such container"))
    }
}

impl InstanceInspector for FakeDocker {
    async fn inspect(&self, name: &str) -> Result<Output> {
        self.record(format!("inspect {name}"));
        Ok(match self.instances.borrow().get(name) {
            Some(state) => ok_output(format!("{state}\n").as_bytes()),
            None => err_output(b"Error: No such container"),
        })
    }

    async fn logs(&self, name: &str, tail: Option<u32>) -> Result<Output> {
        self.record(format!("logs {name} {tail:?}"));
        Ok(ok_output(b"You can now view your Streamlit app in your browser.\n"))
    }

    async fn version(&self) -> Result<Output> {
        Ok(ok_output(b"Docker version 27.3.1, build ce12230\n"))
    }

    async fn info(&self) -> Result<Output> {
        Ok(ok_output(b"27.3.1\n"))
    }
}

// ── Fake Python toolchain ─────────────────────────────────────────────────────

/// Toolchain reporting a fixed version; every invocation is recorded.
///
/// A call whose joined arguments contain `fail_on` exits with status 1.
pub struct FakePython {
    pub banner: &'static str,
    pub fail_on: Option<&'static str>,
    pub calls: RefCell<Vec<String>>,
}

impl FakePython {
    pub fn version(banner: &'static str) -> Self {
        Self {
            banner,
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, needle: &'static str) -> Self {
        self.fail_on = Some(needle);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn ran(&self, needle: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.contains(needle))
    }

    fn exec(&self, call: String) -> ExitStatus {
        let failed = self.fail_on.is_some_and(|n| call.contains(n));
        self.calls.borrow_mut().push(call);
        status(i32::from(failed))
    }
}

impl Toolchain for FakePython {
    async fn interpreter_version(&self) -> Result<Output> {
        Ok(ok_output(self.banner.as_bytes()))
    }

    async fn create_env(&self) -> Result<ExitStatus> {
        Ok(self.exec("venv".to_string()))
    }

    async fn run_python(&self, args: &[&str]) -> Result<ExitStatus> {
        Ok(self.exec(format!("python {}", args.join(" "))))
    }

    async fn run_tool(&self, tool: &str, args: &[&str]) -> Result<ExitStatus> {
        Ok(self.exec(format!("{tool} {}", args.join(" "))))
    }
}

// ── Package managers ──────────────────────────────────────────────────────────

/// No system package manager on the host.
pub struct NoApt;

impl SystemPackageManager for NoApt {
    async fn is_available(&self) -> bool {
        false
    }

    async fn update_index(&self) -> Result<ExitStatus> {
        anyhow::bail!("not expected in this test")
    }

    async fn install(&self, _packages: &[String]) -> Result<ExitStatus> {
        anyhow::bail!("not expected in this test")
    }
}

// ── Reporter and sleeper ──────────────────────────────────────────────────────

/// Reporter collecting `"<kind>: <message>"` lines.
#[derive(Default)]
pub struct CollectingReporter {
    pub lines: RefCell<Vec<String>>,
}

impl CollectingReporter {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

impl ProgressReporter for CollectingReporter {
    fn step(&self, message: &str) {
        self.lines.borrow_mut().push(format!("step: {message}"));
    }

    fn success(&self, message: &str) {
        self.lines.borrow_mut().push(format!("success: {message}"));
    }

    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(format!("warn: {message}"));
    }

    fn logs(&self, heading: &str, body: &str) {
        self.lines
            .borrow_mut()
            .push(format!("logs: {heading}: {body}"));
    }
}

/// Sleeper that never waits.
pub struct NoSleep;

impl Sleeper for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}
