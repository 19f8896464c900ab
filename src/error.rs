// Probe failure kinds. Every variant ends the run as UNKNOWN.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("unsupported metric: {0}")]
    UnsupportedMetric(String),

    #[error("control command not found or not executable: {}", .0.display())]
    CommandNotFound(PathBuf),

    #[error("control command failed (exit code {exit_code}): {stderr}")]
    ExternalCommandFailed { exit_code: i32, stderr: String },

    #[error("metric {0} not found in control command output")]
    MetricNotFoundInOutput(String),

    #[error("malformed statistics line: {0}")]
    MalformedLine(String),

    #[error("invalid numeric value: {0:?}")]
    InvalidNumericValue(String),

    #[error("control command timed out after {0} ms")]
    Timeout(u64),

    #[error("failed to launch control command: {0}")]
    Spawn(#[from] std::io::Error),
}

impl ProbeError {
    /// Stable name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownMetric(_) => "unknown_metric",
            Self::UnsupportedMetric(_) => "unsupported_metric",
            Self::CommandNotFound(_) => "command_not_found",
            Self::ExternalCommandFailed { .. } => "external_command_failed",
            Self::MetricNotFoundInOutput(_) => "metric_not_found_in_output",
            Self::MalformedLine(_) => "malformed_line",
            Self::InvalidNumericValue(_) => "invalid_numeric_value",
            Self::Timeout(_) => "timeout",
            Self::Spawn(_) => "spawn",
        }
    }
}
