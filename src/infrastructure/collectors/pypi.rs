use super::to_record;
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct RecentResponse {
    data: RecentDownloads,
}

#[derive(Debug, Deserialize)]
struct RecentDownloads {
    last_day: u64,
}

#[derive(Debug, Serialize)]
struct PypiSnapshot {
    downloads_last_day: u64,
}

/// Last-day download count of a package from pypistats.
pub struct PypiDownloadsCollector {
    client: Client,
    base_url: String,
    package: String,
}

impl PypiDownloadsCollector {
    pub fn new(client: Client, base_url: String, package: String) -> Self {
        Self {
            client,
            base_url,
            package,
        }
    }
}

#[async_trait]
impl MetricsCollector for PypiDownloadsCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let request = self
            .client
            .get(format!(
                "{}/api/packages/{}/recent",
                self.base_url, self.package
            ))
            .query(&[("range", "all")]);

        let body: RecentResponse = fetch_json(request, "pypistats").await?;
        to_record(&PypiSnapshot {
            downloads_last_day: body.data.last_day,
        })
    }
}
