//! Environment bootstrap workflow against a real temporary project directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use tempfile::TempDir;
use tubedeck_cli::application::services::bootstrap::{BootstrapOutcome, bootstrap};
use tubedeck_cli::domain::BootstrapError;
use tubedeck_cli::domain::config::BootstrapConfig;
use tubedeck_cli::infra::fs::HostFs;

use crate::mocks::{CollectingReporter, FakePython, NoApt};

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("requirements.txt"),
        "# app\nstreamlit>=1.28\nyt-dlp\n\npytest\n",
    )
    .unwrap();
    dir
}

async fn run(python: &FakePython, dir: &Path) -> anyhow::Result<BootstrapOutcome> {
    let plan = BootstrapConfig::default().plan(dir).unwrap();
    bootstrap(python, &NoApt, &HostFs, &CollectingReporter::default(), &plan).await
}

fn bootstrap_error(err: &anyhow::Error) -> &BootstrapError {
    err.downcast_ref::<BootstrapError>()
        .expect("expected a BootstrapError")
}

#[tokio::test]
async fn old_interpreter_fails_before_environment_creation() {
    let dir = project();
    let python = FakePython::version("Python 3.8.10\n");
    let err = run(&python, dir.path()).await.unwrap_err();
    assert!(matches!(
        bootstrap_error(&err),
        BootstrapError::InterpreterTooOld { .. }
    ));
    assert!(python.calls().is_empty(), "{:?}", python.calls());
    assert!(!dir.path().join("downloads").exists());
}

#[tokio::test]
async fn newer_minor_version_proceeds() {
    let dir = project();
    let python = FakePython::version("Python 3.10.12\n");
    let outcome = run(&python, dir.path()).await.unwrap();
    assert_eq!(outcome.interpreter_version, "3.10.12");
    assert_eq!(outcome.requirements, 3);
    assert!(!outcome.system_packages_installed);
    assert!(python.ran("python -m pytest tests/ -v"));
}

#[tokio::test]
async fn repeated_bootstrap_is_idempotent() {
    let dir = project();
    let python = FakePython::version("Python 3.11.4\n");
    run(&python, dir.path()).await.unwrap();
    run(&python, dir.path()).await.unwrap();
    for name in ["downloads", "logs", "temp"] {
        assert!(dir.path().join(name).is_dir(), "{name} missing");
    }
}

#[tokio::test]
async fn hooks_skipped_without_configuration() {
    let dir = project();
    let python = FakePython::version("Python 3.11.4\n");
    let outcome = run(&python, dir.path()).await.unwrap();
    assert!(!outcome.hooks_installed);
    assert!(!python.ran("pre-commit"));
}

#[tokio::test]
async fn hooks_installed_with_configuration() {
    let dir = project();
    std::fs::write(dir.path().join(".pre-commit-config.yaml"), "repos: []\n").unwrap();
    let python = FakePython::version("Python 3.11.4\n");
    let outcome = run(&python, dir.path()).await.unwrap();
    assert!(outcome.hooks_installed);
    assert!(python.ran("pre-commit install"));
}

#[tokio::test]
async fn missing_manifest_is_fatal() {
    let dir = TempDir::new().unwrap();
    let python = FakePython::version("Python 3.11.4\n");
    let err = run(&python, dir.path()).await.unwrap_err();
    assert!(matches!(
        bootstrap_error(&err),
        BootstrapError::MissingManifest(_)
    ));
    assert!(!python.ran("pytest"));
}

#[tokio::test]
async fn failing_tests_abort_with_step_name() {
    let dir = project();
    let python = FakePython::version("Python 3.11.4\n").failing_on("pytest");
    let err = run(&python, dir.path()).await.unwrap_err();
    match bootstrap_error(&err) {
        BootstrapError::StepFailed { step, code } => {
            assert_eq!(step, "test suite");
            assert_eq!(code, "1");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn shell_scripts_become_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = project();
    let scripts = dir.path().join("scripts");
    std::fs::create_dir(&scripts).unwrap();
    for name in ["setup.sh", "notes.txt"] {
        let path = scripts.join(name);
        std::fs::write(&path, "").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
    }
    let python = FakePython::version("Python 3.11.4\n");
    let outcome = run(&python, dir.path()).await.unwrap();
    assert_eq!(outcome.scripts_normalized, 1);
    let mode = |n: &str| {
        std::fs::metadata(scripts.join(n))
            .unwrap()
            .permissions()
            .mode()
            & 0o777
    };
    assert_eq!(mode("setup.sh"), 0o755);
    assert_eq!(mode("notes.txt"), 0o644);
}
