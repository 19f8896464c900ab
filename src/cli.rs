// Command-line surface

use crate::config::Overrides;
use crate::models::HealthState;
use crate::version;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Checks one OpenSIPS statistic against warning/critical thresholds.
///
/// Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN; 4 for a failed self-test.
#[derive(Parser, Debug)]
#[command(name = version::NAME, version = version::VERSION, about, disable_version_flag = true)]
pub struct Cli {
    /// Print version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Check that the control command is present and runs, then exit
    #[arg(short = 't', long = "self-test")]
    pub self_test: bool,

    /// Statistic to check (see --list-metrics)
    #[arg(short = 'M', long = "metric")]
    pub metric: Option<String>,

    /// Exit with this state (0-3 or ok/warning/critical/unknown) without querying
    #[arg(short = 'x', long = "exitstatus")]
    pub exit_state: Option<HealthState>,

    /// Warning threshold (default 2)
    #[arg(short = 'w', long = "warning")]
    pub warning: Option<f64>,

    /// Critical threshold (default 5)
    #[arg(short = 'c', long = "critical")]
    pub critical: Option<f64>,

    /// Control command path, overrides control.command
    #[arg(long = "ctl")]
    pub ctl: Option<String>,

    /// TOML config file (falls back to CONFIG_FILE)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Print known statistics and exit
    #[arg(long = "list-metrics")]
    pub list_metrics: bool,

    /// Log filter for stderr, e.g. debug (falls back to RUST_LOG, then warn)
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            command: self.ctl.clone(),
            warning: self.warning,
            critical: self.critical,
        }
    }
}
