// Tri-state verdict plus UNKNOWN

use std::fmt;
use std::str::FromStr;

/// Final verdict of a probe. OK < WARNING < CRITICAL by severity; UNKNOWN sits outside that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl HealthState {
    /// Process exit code consumed by the monitoring supervisor.
    pub fn exit_code(self) -> u8 {
        match self {
            HealthState::Ok => 0,
            HealthState::Warning => 1,
            HealthState::Critical => 2,
            HealthState::Unknown => 3,
        }
    }

    pub fn from_exit_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(HealthState::Ok),
            1 => Some(HealthState::Warning),
            2 => Some(HealthState::Critical),
            3 => Some(HealthState::Unknown),
            _ => None,
        }
    }

    /// Severity rank; None for UNKNOWN.
    pub fn severity(self) -> Option<u8> {
        match self {
            HealthState::Unknown => None,
            s => Some(s.exit_code()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthState::Ok => "OK",
            HealthState::Warning => "WARNING",
            HealthState::Critical => "CRITICAL",
            HealthState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts an exit code ("0".."3") or a state name in any case.
impl FromStr for HealthState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return HealthState::from_exit_code(code)
                .ok_or_else(|| format!("exit state must be 0-3, got {}", code));
        }
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(HealthState::Ok),
            "warning" | "warn" => Ok(HealthState::Warning),
            "critical" | "crit" => Ok(HealthState::Critical),
            "unknown" => Ok(HealthState::Unknown),
            _ => Err(format!("unrecognised exit state: {}", s)),
        }
    }
}
