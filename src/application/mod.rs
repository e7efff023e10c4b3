pub mod collector_registry;
pub mod metrics_job;
pub mod metrics_runner;

pub use collector_registry::CollectorRegistry;
pub use metrics_job::{MetricsJob, RunSummary};
pub use metrics_runner::MetricsRunner;
