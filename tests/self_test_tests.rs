// Self-test path: reachability and trial invocation

#![cfg(unix)]

mod common;

use common::*;
use opensips_probe::config::ProbeConfig;
use opensips_probe::self_test::{self, SELF_TEST_FAILURE_CODE};
use tempfile::TempDir;

#[tokio::test]
async fn missing_binary_is_unreachable() {
    let config = ProbeConfig {
        command: "/nonexistent/sbin/opensipsctl".into(),
        ..ProbeConfig::default()
    };
    let report = self_test::run(&config).await;
    assert!(!report.reachable);
    assert!(!report.invocable);
    assert_eq!(report.exit_code(), SELF_TEST_FAILURE_CODE);
    assert!((0..=3).all(|code| report.exit_code() != code));
    assert!(report.message("openSIPS").starts_with("openSIPS SELFTEST FAILED - "));
}

#[tokio::test]
async fn working_binary_passes() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "version.sh", "echo 'Server:: OpenSIPS (3.4.0)'\n");
    let config = config_for_script(&script, 2.0, 5.0);
    let report = self_test::run(&config).await;
    assert!(report.passed(), "{:?}", report);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.command, "/bin/sh");
}

#[tokio::test]
async fn failing_trial_run_is_reachable_but_not_invocable() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "down.sh", "echo 'connection refused' >&2\nexit 1\n");
    let report = self_test::run(&config_for_script(&script, 2.0, 5.0)).await;
    assert!(report.reachable);
    assert!(!report.invocable);
    assert_eq!(report.exit_code(), SELF_TEST_FAILURE_CODE);
    assert!(report.error.as_deref().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn non_executable_file_is_reachable_but_not_invocable() {
    let dir = TempDir::new().unwrap();
    let plain = write_script(&dir, "opensipsctl", "#!/bin/sh\nexit 0\n");
    let config = ProbeConfig {
        command: plain.to_str().unwrap().to_string(),
        ..ProbeConfig::default()
    };
    let report = self_test::run(&config).await;
    assert!(report.reachable);
    assert!(!report.invocable);
    assert_eq!(report.exit_code(), SELF_TEST_FAILURE_CODE);
}

#[tokio::test]
async fn self_test_and_probe_pick_the_same_binary_on_path() {
    use opensips_probe::probe;
    use std::os::unix::fs::PermissionsExt;

    let shadow = TempDir::new().unwrap();
    let real = TempDir::new().unwrap();
    // Same name twice on PATH; only the later one is executable.
    let plain = write_script(&shadow, "fakectl", "#!/bin/sh\nexit 1\n");
    std::fs::set_permissions(&plain, std::fs::Permissions::from_mode(0o644)).unwrap();
    let runnable = write_script(
        &real,
        "fakectl",
        "#!/bin/sh\necho 'dialog:active_dialogs = 1'\n",
    );
    std::fs::set_permissions(&runnable, std::fs::Permissions::from_mode(0o755)).unwrap();

    let original = std::env::var_os("PATH").unwrap_or_default();
    let mut dirs = vec![shadow.path().to_path_buf(), real.path().to_path_buf()];
    dirs.extend(std::env::split_paths(&original));
    unsafe { std::env::set_var("PATH", std::env::join_paths(dirs).unwrap()) };

    let config = ProbeConfig {
        command: "fakectl".into(),
        self_test_args: vec![],
        ..ProbeConfig::default()
    };
    let report = self_test::run(&config).await;
    let verdict = probe::run("active_dialogs", &config).await;
    unsafe { std::env::set_var("PATH", &original) };

    assert!(report.passed(), "{:?}", report);
    assert_eq!(report.command, runnable.display().to_string());
    assert_eq!(verdict.exit_code(), 0);
    assert_eq!(verdict.message, "openSIPS OK - 1 current active dialogs");
}
