//! Ordered mapping from category name to collector.

use crate::domain::ports::MetricsCollector;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

struct RegisteredCollector {
    category: String,
    collector: Arc<dyn MetricsCollector>,
}

/// The fixed set of sources polled on each run.
///
/// Iteration follows registration order. Category names are unique;
/// registering an existing category replaces its collector in place.
#[derive(Default)]
pub struct CollectorRegistry {
    entries: Vec<RegisteredCollector>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        category: impl Into<String>,
        collector: Arc<dyn MetricsCollector>,
    ) -> &mut Self {
        let category = category.into();
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(existing) => {
                warn!("Collector for '{}' registered twice, replacing", category);
                existing.collector = collector;
            }
            None => self.entries.push(RegisteredCollector {
                category,
                collector,
            }),
        }
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, category: impl Into<String>, collector: Arc<dyn MetricsCollector>) -> Self {
        self.register(category, collector);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn MetricsCollector>)> {
        self.entries
            .iter()
            .map(|e| (e.category.as_str(), &e.collector))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.category.as_str())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CollectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.categories()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CollectorError;
    use crate::domain::metrics::Record;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl MetricsCollector for Noop {
        async fn collect(&self) -> Result<Record, CollectorError> {
            Ok(Record::new())
        }
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let registry = CollectorRegistry::new()
            .with("newsletter", Arc::new(Noop))
            .with("github", Arc::new(Noop))
            .with("pipy", Arc::new(Noop));

        let categories: Vec<&str> = registry.categories().collect();
        assert_eq!(categories, vec!["newsletter", "github", "pipy"]);
    }

    #[test]
    fn test_duplicate_category_replaces_in_place() {
        let registry = CollectorRegistry::new()
            .with("a", Arc::new(Noop))
            .with("b", Arc::new(Noop))
            .with("a", Arc::new(Noop));

        assert_eq!(registry.len(), 2);
        let categories: Vec<&str> = registry.categories().collect();
        assert_eq!(categories, vec!["a", "b"]);
    }
}
