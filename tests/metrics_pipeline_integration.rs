use async_trait::async_trait;
use project_metrics::application::{CollectorRegistry, MetricsJob, MetricsRunner};
use project_metrics::domain::ports::{HistoryRepository, MetricsCollector};
use project_metrics::domain::{CollectorError, History, Record};
use project_metrics::infrastructure::JsonHistoryStore;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Counter {
    field: &'static str,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl MetricsCollector for Counter {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let mut record = Record::new();
        record.insert(self.field.to_string(), json!(n));
        Ok(record)
    }
}

struct Unreachable;

#[async_trait]
impl MetricsCollector for Unreachable {
    async fn collect(&self) -> Result<Record, CollectorError> {
        Err(CollectorError::Status {
            url: "https://example.invalid/api".to_string(),
            status: 503,
        })
    }
}

fn registry(calls: &Arc<AtomicUsize>) -> CollectorRegistry {
    CollectorRegistry::new()
        .with(
            "a",
            Arc::new(Counter {
                field: "x",
                calls: calls.clone(),
            }),
        )
        .with("b", Arc::new(Unreachable))
}

#[tokio::test]
async fn test_single_run_appends_batch_to_empty_history() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");
    let store = Arc::new(JsonHistoryStore::new(&path));
    let calls = Arc::new(AtomicUsize::new(0));

    let job = MetricsJob::new(registry(&calls), MetricsRunner::new(), store.clone());
    let summary = job.run(1_700_000_000).await?;

    assert_eq!(summary.collected, 1);
    assert_eq!(summary.failed, vec!["b".to_string()]);

    let persisted: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(
        persisted,
        json!({
            "a": [{"x": 1, "updated_date": 1_700_000_000}],
            "b": [{}]
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_repeated_runs_grow_every_series_by_one() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(JsonHistoryStore::new(dir.path().join("metrics.json")));
    let calls = Arc::new(AtomicUsize::new(0));
    let job = MetricsJob::new(registry(&calls), MetricsRunner::new(), store.clone());

    job.run(100).await?;
    job.run(200).await?;
    job.run(300).await?;

    let history = store.load()?;
    assert_eq!(history.series("a").len(), 3);
    assert_eq!(history.series("b").len(), 3);

    let dates: Vec<i64> = history
        .series("a")
        .iter()
        .map(|r| r["updated_date"].as_i64().unwrap())
        .collect();
    assert_eq!(dates, vec![100, 200, 300]);
    assert!(history.series("b").iter().all(|r| r.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_categories_dropped_from_registry_keep_their_history() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");
    fs::write(
        &path,
        r#"{"instagram": [{"total_followers": 10, "updated_date": 1}]}"#,
    )?;
    let store = Arc::new(JsonHistoryStore::new(&path));
    let calls = Arc::new(AtomicUsize::new(0));

    MetricsJob::new(registry(&calls), MetricsRunner::new(), store.clone())
        .run(2)
        .await?;

    let history = store.load()?;
    assert_eq!(history.series("instagram").len(), 1);
    assert_eq!(history.series("a").len(), 1);
    assert_eq!(history.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_history_aborts_before_collecting() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("metrics.json");
    fs::write(&path, "[1, 2")?;
    let store = Arc::new(JsonHistoryStore::new(&path));
    let calls = Arc::new(AtomicUsize::new(0));

    let result = MetricsJob::new(registry(&calls), MetricsRunner::new(), store)
        .run(1)
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(fs::read_to_string(&path)?, "[1, 2");
    Ok(())
}

struct ReadOnlyRepository {
    history: History,
}

impl HistoryRepository for ReadOnlyRepository {
    fn load(&self) -> anyhow::Result<History> {
        Ok(self.history.clone())
    }

    fn save(&self, _history: &History) -> anyhow::Result<()> {
        anyhow::bail!("permission denied")
    }
}

#[tokio::test]
async fn test_save_failure_propagates() {
    let calls = Arc::new(AtomicUsize::new(0));
    let repository = Arc::new(ReadOnlyRepository {
        history: History::new(),
    });

    let err = MetricsJob::new(registry(&calls), MetricsRunner::new(), repository)
        .run(1)
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("permission denied"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
