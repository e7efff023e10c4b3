//! Project metrics collector - run-to-completion batch job
//!
//! Polls every registered source once, appends the batch to the JSON history
//! file and exits. Intended to be scheduled externally, one instance at a time.
//!
//! # Usage
//! ```sh
//! METRICS_HISTORY_PATH=metrics.json cargo run --release
//! ```
//!
//! # Environment Variables
//! - `METRICS_HISTORY_PATH` - History file to extend (default: metrics.json)
//! - `METRICS_MAX_CONCURRENCY` - Collectors in flight at once (default: 1)
//! - `RUST_LOG` - Log filter (default: info)
//!
//! Credentials (`MAILCHIMP_API_KEY`, `DISCORD_TOKEN`, ...) are read from the
//! environment or a `.env` file.

use anyhow::Result;
use chrono::Utc;
use project_metrics::application::metrics_job::MetricsJob;
use project_metrics::application::metrics_runner::MetricsRunner;
use project_metrics::config::Config;
use project_metrics::infrastructure::core::HttpClientFactory;
use project_metrics::infrastructure::factory::CollectorFactory;
use project_metrics::infrastructure::history_store::JsonHistoryStore;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(stdout_layer)
        .init();

    info!("Project metrics {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: History={:?}, Concurrency={}",
        config.runner.history_path, config.runner.max_concurrency
    );

    let client = HttpClientFactory::create_client()?;
    let registry = CollectorFactory::create_registry(&config, client);
    let runner = MetricsRunner::with_max_concurrency(config.runner.max_concurrency);
    let store = Arc::new(JsonHistoryStore::new(config.runner.history_path.clone()));

    // One timestamp shared by every record of this run
    let run_timestamp = Utc::now().timestamp();

    let job = MetricsJob::new(registry, runner, store);
    let summary = job.run(run_timestamp).await?;

    if summary.failed.is_empty() {
        info!(
            "Metrics run {} finished: {} collected, {} categories tracked",
            summary.run_timestamp, summary.collected, summary.tracked_categories
        );
    } else {
        warn!(
            "Metrics run {} finished: {} collected, failed: {}",
            summary.run_timestamp,
            summary.collected,
            summary.failed.join(", ")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_can_lower_verbosity() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            log_filter(Some("project_metrics=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
