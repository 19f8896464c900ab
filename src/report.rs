// Status line + exit code for the monitoring supervisor

use crate::error::ProbeError;
use crate::models::{HealthState, MetricValue};

/// Product prefix used when config does not override it.
pub const DEFAULT_PREFIX: &str = "openSIPS";

/// What the probe prints on stdout and the code it exits with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub state: HealthState,
    pub message: String,
}

impl Report {
    pub fn exit_code(&self) -> u8 {
        self.state.exit_code()
    }
}

/// `<prefix> <STATE> - <value> <description>`; unavailable values render as the placeholder.
pub fn format(
    prefix: &str,
    state: HealthState,
    value: MetricValue,
    description: &str,
) -> (String, u8) {
    (
        format!("{} {} - {} {}", prefix, state, value, description),
        state.exit_code(),
    )
}

pub fn classified(
    prefix: &str,
    state: HealthState,
    value: MetricValue,
    description: &str,
) -> Report {
    let (message, _) = format(prefix, state, value, description);
    Report { state, message }
}

/// Any probe failure is UNKNOWN; the message names the failure, never a backtrace.
pub fn failure(prefix: &str, err: &ProbeError) -> Report {
    unknown(prefix, &err.to_string())
}

pub fn unknown(prefix: &str, detail: &str) -> Report {
    Report {
        state: HealthState::Unknown,
        message: format!("{} {} - {}", prefix, HealthState::Unknown, one_line(detail)),
    }
}

/// Joins multi-line text (e.g. captured stderr) with "; ".
pub fn one_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// `--exitstatus` short-circuit.
pub fn forced(prefix: &str, state: HealthState) -> Report {
    Report {
        state,
        message: format!("{} {} - exit state forced", prefix, state),
    }
}
