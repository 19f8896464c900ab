// One probe run: catalog -> control command -> parser -> classifier -> report.

use crate::catalog;
use crate::classifier;
use crate::config::ProbeConfig;
use crate::ctl_repo::ControlCommand;
use crate::error::ProbeError;
use crate::models::{HealthState, MetricValue};
use crate::parser;
use crate::report::{self, Report};
use tracing::{debug, warn};

/// Successful pass through the pipeline, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub value: MetricValue,
    pub state: HealthState,
    pub description: &'static str,
}

/// Stops at the first failure; nothing is retried.
pub async fn measure(metric: &str, config: &ProbeConfig) -> Result<Measurement, ProbeError> {
    let description = catalog::describe(metric)?;
    let value = acquire(metric, config).await?;
    let state = classifier::classify(value, &config.thresholds);
    debug!(metric, %value, %state, "classified");
    Ok(Measurement {
        value,
        state,
        description,
    })
}

/// Control command output -> parsed reading.
async fn acquire(metric: &str, config: &ProbeConfig) -> Result<MetricValue, ProbeError> {
    let ctl = ControlCommand::resolve(&config.command, config.timeout)?;
    let result = ctl.execute(&config.args).await?;
    parser::parse_with(config.match_mode.matcher(), &result.stdout, metric)
}

/// Never fails. A rejected id is a bare UNKNOWN line; once the id is known, a failed
/// read leaves the value unavailable and the failure is appended to the description.
pub async fn run(metric: &str, config: &ProbeConfig) -> Report {
    let description = match catalog::describe(metric) {
        Ok(d) => d,
        Err(e) => {
            warn!(metric, kind = e.kind(), error = %e, "metric rejected");
            return report::failure(&config.prefix, &e);
        }
    };
    let value = match acquire(metric, config).await {
        Ok(value) => value,
        Err(e) => {
            warn!(metric, kind = e.kind(), error = %e, "probe failed");
            let value = MetricValue::Unavailable;
            let state = classifier::classify(value, &config.thresholds);
            let detail = format!("{} ({})", description, report::one_line(&e.to_string()));
            return report::classified(&config.prefix, state, value, &detail);
        }
    };
    let state = classifier::classify(value, &config.thresholds);
    debug!(metric, %value, %state, "classified");
    report::classified(&config.prefix, state, value, description)
}
