// Probe models: verdict, reading, thresholds, raw control command outcome

mod health;
mod query;
mod reading;

pub use health::HealthState;
pub use query::QueryResult;
pub use reading::{MetricValue, ThresholdPair, UNAVAILABLE_PLACEHOLDER};
