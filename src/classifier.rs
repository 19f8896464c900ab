// Threshold comparison

use crate::models::{HealthState, MetricValue, ThresholdPair};

/// Rules in fixed order, first hit wins: unavailable, >= critical, >= warning, OK.
/// Inverted thresholds are not rejected; critical is simply checked first.
pub fn classify(value: MetricValue, thresholds: &ThresholdPair) -> HealthState {
    let Some(v) = value.reading() else {
        return HealthState::Unknown;
    };
    if v >= thresholds.critical {
        HealthState::Critical
    } else if v >= thresholds.warning {
        HealthState::Warning
    } else {
        HealthState::Ok
    }
}
