// Extracts one statistic from `opensipsctl fifo get_statistics` style output.
//
// Lines look like `dialog:active_dialogs = 42`: split on single spaces, the value
// is the token at index 2.

use crate::error::ProbeError;
use crate::models::MetricValue;
use serde::Deserialize;
use tracing::debug;

/// Zero-based position of the value token on a statistics line.
pub const VALUE_TOKEN_INDEX: usize = 2;

/// Decides whether a line carries the requested metric.
pub trait LineMatcher {
    fn matches(&self, line: &str, metric: &str) -> bool;
}

/// Unanchored substring match. An id nested inside a longer one (`used_size` in
/// `real_used_size`) matches whichever of those lines comes first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Substring;

impl LineMatcher for Substring {
    fn matches(&self, line: &str, metric: &str) -> bool {
        line.contains(metric)
    }
}

/// The first token must be the id itself or end with `:<id>` (group prefix).
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactName;

impl LineMatcher for ExactName {
    fn matches(&self, line: &str, metric: &str) -> bool {
        let Some(name) = line.split(' ').next() else {
            return false;
        };
        name == metric
            || name
                .strip_suffix(metric)
                .is_some_and(|group| group.ends_with(':'))
    }
}

/// Matching policy selected in config (`output.match_mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Substring,
    Exact,
}

impl MatchMode {
    pub fn matcher(self) -> &'static dyn LineMatcher {
        match self {
            MatchMode::Substring => &Substring,
            MatchMode::Exact => &ExactName,
        }
    }
}

/// Value of `metric` from the first matching line, using the loose substring policy.
pub fn parse(output: &str, metric: &str) -> Result<MetricValue, ProbeError> {
    parse_with(&Substring, output, metric)
}

/// First match wins; later matching lines are ignored.
pub fn parse_with(
    matcher: &dyn LineMatcher,
    output: &str,
    metric: &str,
) -> Result<MetricValue, ProbeError> {
    let line = output
        .lines()
        .find(|line| matcher.matches(line, metric))
        .ok_or_else(|| ProbeError::MetricNotFoundInOutput(metric.to_string()))?;
    debug!(metric, line, "matched statistics line");

    let token = line
        .split(' ')
        .nth(VALUE_TOKEN_INDEX)
        .ok_or_else(|| ProbeError::MalformedLine(line.to_string()))?;

    parse_decimal(token).map(MetricValue::Reading)
}

/// Plain decimal only: optional sign, digits, optional fraction.
fn parse_decimal(token: &str) -> Result<f64, ProbeError> {
    let invalid = || ProbeError::InvalidNumericValue(token.to_string());
    let unsigned = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) {
        return Err(invalid());
    }
    if let Some(f) = frac_part
        && (f.is_empty() || !all_digits(f))
    {
        return Err(invalid());
    }
    // Digits past f64 range parse as infinity.
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(invalid)
}
