// Parsed metric reading and threshold bounds

use serde::Deserialize;
use std::fmt;

/// Placeholder rendered instead of a number when no reading exists.
pub const UNAVAILABLE_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MetricValue {
    #[default]
    Unavailable,
    Reading(f64),
}

impl MetricValue {
    pub fn reading(self) -> Option<f64> {
        match self {
            MetricValue::Reading(v) => Some(v),
            MetricValue::Unavailable => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Reading(v) => write!(f, "{}", v),
            MetricValue::Unavailable => f.write_str(UNAVAILABLE_PLACEHOLDER),
        }
    }
}

/// Warning and critical bounds. warning <= critical is conventional but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdPair {
    #[serde(default = "default_warning")]
    pub warning: f64,
    #[serde(default = "default_critical")]
    pub critical: f64,
}

fn default_warning() -> f64 {
    2.0
}

fn default_critical() -> f64 {
    5.0
}

impl Default for ThresholdPair {
    fn default() -> Self {
        Self {
            warning: default_warning(),
            critical: default_critical(),
        }
    }
}

impl ThresholdPair {
    pub fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    pub fn is_inverted(&self) -> bool {
        self.critical < self.warning
    }
}
