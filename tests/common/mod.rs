// Shared test helpers: fake opensipsctl scripts run through /bin/sh

#![allow(dead_code)]

use opensips_probe::config::ProbeConfig;
use opensips_probe::models::ThresholdPair;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Typical `opensipsctl fifo get_statistics all` output.
pub const STATS_OUTPUT: &str = "\
core:rcv_requests = 1200
core:rcv_replies = 800
dialog:active_dialogs = 42
dialog:early_dialogs = 3
shmem:real_used_size = 4096
shmem:used_size = 2048
usrloc:registered_users = 17
";

/// Writes `body` as a shell script. Run it as `/bin/sh <path>` so no execute bit is needed.
pub fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Script that prints `stdout` and exits 0.
pub fn printing_script(dir: &TempDir, stdout: &str) -> PathBuf {
    let newline = if stdout.ends_with('\n') { "" } else { "\n" };
    let body = format!("cat <<'STATS'\n{}{}STATS\n", stdout, newline);
    write_script(dir, "opensipsctl.sh", &body)
}

pub fn config_for_script(script: &Path, warning: f64, critical: f64) -> ProbeConfig {
    ProbeConfig {
        command: "/bin/sh".into(),
        args: vec![script.to_str().unwrap().to_string()],
        self_test_args: vec![script.to_str().unwrap().to_string()],
        timeout: Duration::from_secs(5),
        thresholds: ThresholdPair::new(warning, critical),
        ..ProbeConfig::default()
    }
}

/// Script that records its pid in `pid_file`, then blocks.
pub fn hanging_script(dir: &TempDir, pid_file: &Path) -> PathBuf {
    let body = format!("echo $$ > '{}'\nexec sleep 30\n", pid_file.display());
    write_script(dir, "hang.sh", &body)
}

pub fn read_pid(pid_file: &Path) -> Option<u32> {
    std::fs::read_to_string(pid_file).ok()?.trim().parse().ok()
}

/// True while the process exists and is not a zombie awaiting reaping.
#[cfg(target_os = "linux")]
pub fn process_running(pid: u32) -> bool {
    let Ok(stat) = std::fs::read_to_string(format!("/proc/{}/stat", pid)) else {
        return false;
    };
    let state = stat
        .rsplit_once(") ")
        .and_then(|(_, rest)| rest.chars().next());
    !matches!(state, Some('Z') | Some('X') | None)
}

/// Polls until the process is gone or `deadline` passes.
#[cfg(target_os = "linux")]
pub async fn wait_until_gone(pid: u32, deadline: Duration) -> bool {
    let started = std::time::Instant::now();
    while started.elapsed() < deadline {
        if !process_running(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    !process_running(pid)
}
