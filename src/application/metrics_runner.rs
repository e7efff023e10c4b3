//! Runs every registered collector and assembles the batch.

use crate::application::collector_registry::CollectorRegistry;
use crate::domain::metrics::{Batch, CollectionOutcome, UPDATED_DATE_FIELD};
use crate::domain::ports::MetricsCollector;
use futures_util::stream::{self, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Executes collectors with per-collector failure isolation.
///
/// With `max_concurrency == 1` collectors run strictly one after another in
/// registry order. Higher values keep at most that many requests in flight;
/// the batch is identical either way, only log ordering may differ.
#[derive(Debug, Clone)]
pub struct MetricsRunner {
    max_concurrency: usize,
}

impl Default for MetricsRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRunner {
    pub fn new() -> Self {
        Self { max_concurrency: 1 }
    }

    pub fn with_max_concurrency(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Produces exactly one batch entry per registered category.
    ///
    /// Collected records are stamped with `run_timestamp`; failed collectors
    /// contribute an empty record and a logged diagnostic.
    pub async fn run(&self, registry: &CollectorRegistry, run_timestamp: i64) -> Batch {
        let outcomes: Vec<(String, CollectionOutcome)> = stream::iter(registry.iter())
            .map(|(category, collector)| {
                let category = category.to_string();
                let collector = Arc::clone(collector);
                async move {
                    let outcome = Self::collect_one(&category, collector, run_timestamp).await;
                    (category, outcome)
                }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut batch = Batch::new();
        for (category, outcome) in outcomes {
            batch.insert(category, outcome);
        }

        info!(
            "Run complete: {} collected, {} failed",
            batch.len() - batch.failed_categories().len(),
            batch.failed_categories().len()
        );
        batch
    }

    async fn collect_one(
        category: &str,
        collector: Arc<dyn MetricsCollector>,
        run_timestamp: i64,
    ) -> CollectionOutcome {
        info!("Running: {}", category);
        // Spawned so a panicking collector is reported like any other failure
        let result = match tokio::spawn(async move { collector.collect().await }).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(format!("collector task aborted: {}", e)),
        };

        match result {
            Ok(mut record) => {
                record.insert(UPDATED_DATE_FIELD.to_string(), Value::from(run_timestamp));
                CollectionOutcome::Collected(record)
            }
            Err(reason) => {
                error!("Error: {} - {}", category, reason);
                CollectionOutcome::Failed { reason }
            }
        }
    }
}
