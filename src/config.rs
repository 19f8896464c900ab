use crate::models::ThresholdPair;
use crate::parser::MatchMode;
use crate::report::DEFAULT_PREFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub thresholds: ThresholdPair,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControlConfig {
    /// Path to opensipsctl, or a bare name looked up on PATH.
    #[serde(default = "default_command")]
    pub command: String,
    /// Arguments that make the control command dump all statistics.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Arguments for the self-test trial run.
    #[serde(default = "default_self_test_args")]
    pub self_test_args: Vec<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_command() -> String {
    "opensipsctl".into()
}

fn default_args() -> Vec<String> {
    vec!["fifo".into(), "get_statistics".into(), "all".into()]
}

fn default_self_test_args() -> Vec<String> {
    vec!["fifo".into(), "version".into()]
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            self_test_args: default_self_test_args(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub match_mode: MatchMode,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            match_mode: MatchMode::default(),
        }
    }
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub command: Option<String>,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
}

/// Immutable settings for one probe run, built once and passed to every component.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub command: String,
    pub args: Vec<String>,
    pub self_test_args: Vec<String>,
    pub timeout: Duration,
    pub thresholds: ThresholdPair,
    pub prefix: String,
    pub match_mode: MatchMode,
}

impl AppConfig {
    /// Explicit path first, then CONFIG_FILE; with neither, built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("CONFIG_FILE").map(PathBuf::from));
        match path {
            Some(path) => {
                let s = std::fs::read_to_string(&path).map_err(|e| {
                    anyhow::anyhow!("cannot read config {}: {}", path.display(), e)
                })?;
                Self::load_from_str(&s)
            }
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.control.command.is_empty(),
            "control.command must be non-empty"
        );
        anyhow::ensure!(
            self.control.timeout_ms > 0,
            "control.timeout_ms must be > 0, got {}",
            self.control.timeout_ms
        );
        validate_thresholds(&self.thresholds)?;
        anyhow::ensure!(
            !self.output.prefix.trim().is_empty(),
            "output.prefix must be non-empty"
        );
        Ok(())
    }

    /// Apply command-line overrides and freeze the result.
    pub fn into_probe_config(self, overrides: Overrides) -> anyhow::Result<ProbeConfig> {
        let thresholds = ThresholdPair {
            warning: overrides.warning.unwrap_or(self.thresholds.warning),
            critical: overrides.critical.unwrap_or(self.thresholds.critical),
        };
        validate_thresholds(&thresholds)?;
        let command = overrides.command.unwrap_or(self.control.command);
        anyhow::ensure!(!command.is_empty(), "control command must be non-empty");
        if thresholds.is_inverted() {
            tracing::warn!(
                warning = thresholds.warning,
                critical = thresholds.critical,
                "critical threshold is below warning threshold"
            );
        }
        Ok(ProbeConfig {
            command,
            args: self.control.args,
            self_test_args: self.control.self_test_args,
            timeout: Duration::from_millis(self.control.timeout_ms),
            thresholds,
            prefix: self.output.prefix,
            match_mode: self.output.match_mode,
        })
    }
}

fn validate_thresholds(t: &ThresholdPair) -> anyhow::Result<()> {
    anyhow::ensure!(
        t.warning.is_finite() && t.warning >= 0.0,
        "thresholds.warning must be a non-negative number, got {}",
        t.warning
    );
    anyhow::ensure!(
        t.critical.is_finite() && t.critical >= 0.0,
        "thresholds.critical must be a non-negative number, got {}",
        t.critical
    );
    Ok(())
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        Self {
            command: app.control.command,
            args: app.control.args,
            self_test_args: app.control.self_test_args,
            timeout: Duration::from_millis(app.control.timeout_ms),
            thresholds: app.thresholds,
            prefix: app.output.prefix,
            match_mode: app.output.match_mode,
        }
    }
}
