//! One full collection run: load history, run collectors, merge, save.

use crate::application::collector_registry::CollectorRegistry;
use crate::application::metrics_runner::MetricsRunner;
use crate::domain::ports::HistoryRepository;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_timestamp: i64,
    pub collected: usize,
    pub failed: Vec<String>,
    pub tracked_categories: usize,
}

pub struct MetricsJob {
    registry: CollectorRegistry,
    runner: MetricsRunner,
    repository: Arc<dyn HistoryRepository>,
}

impl MetricsJob {
    pub fn new(
        registry: CollectorRegistry,
        runner: MetricsRunner,
        repository: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            registry,
            runner,
            repository,
        }
    }

    pub fn registry(&self) -> &CollectorRegistry {
        &self.registry
    }

    /// Executes `Load -> Run-collectors -> Merge -> Save`.
    ///
    /// Collector failures never abort the run. History load/save failures do,
    /// and leave the persisted file as it was.
    pub async fn run(&self, run_timestamp: i64) -> Result<RunSummary> {
        let mut history = self
            .repository
            .load()
            .context("Failed to load metrics history")?;
        info!(
            "Loaded history with {} categories, running {} collectors",
            history.len(),
            self.registry.len()
        );

        let batch = self.runner.run(&self.registry, run_timestamp).await;
        let failed = batch.failed_categories().to_vec();
        let collected = batch.len() - failed.len();

        history.merge(batch);
        self.repository
            .save(&history)
            .context("Failed to save metrics history")?;

        Ok(RunSummary {
            run_timestamp,
            collected,
            failed,
            tracked_categories: history.len(),
        })
    }
}
