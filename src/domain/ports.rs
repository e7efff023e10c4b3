use crate::domain::errors::CollectorError;
use crate::domain::metrics::{History, Record};
use anyhow::Result;
use async_trait::async_trait;

/// A single metric source.
#[async_trait]
pub trait MetricsCollector: Send + Sync {
    /// Fetch and normalize one snapshot of the source.
    async fn collect(&self) -> Result<Record, CollectorError>;
}

/// Durable storage for the metrics history.
pub trait HistoryRepository: Send + Sync {
    /// Returns an empty history when nothing has been persisted yet.
    fn load(&self) -> Result<History>;

    /// Overwrites the persisted history with `history`.
    fn save(&self, history: &History) -> Result<()>;
}
