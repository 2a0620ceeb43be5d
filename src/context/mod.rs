//! Application-wide shared state.

mod metrics;

pub use metrics::{AppMetrics, Metrics};
