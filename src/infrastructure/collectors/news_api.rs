use super::{parse_utc_timestamp, require, to_record};
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    source: ArticleSource,
    title: Option<String>,
    url: String,
    published_at: String,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: String,
}

#[derive(Debug, Serialize)]
struct Headline {
    source: String,
    title: Option<String>,
    url: String,
    published_date: i64,
}

#[derive(Debug, Serialize)]
struct HeadlinesSnapshot {
    articles: Vec<Headline>,
}

/// News articles mentioning the search term.
pub struct HeadlinesCollector {
    client: Client,
    base_url: String,
    token: Option<String>,
    search_term: String,
}

impl HeadlinesCollector {
    pub fn new(client: Client, base_url: String, token: Option<String>, search_term: String) -> Self {
        Self {
            client,
            base_url,
            token,
            search_term,
        }
    }
}

#[async_trait]
impl MetricsCollector for HeadlinesCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let token = require(&self.token, "NEWSAPI_TOKEN")?;
        let request = self
            .client
            .get(format!("{}/v2/everything", self.base_url))
            .query(&[("q", self.search_term.as_str()), ("apiKey", token)]);

        let body: EverythingResponse = fetch_json(request, "newsapi").await?;
        let articles = body
            .articles
            .into_iter()
            .map(|article| -> Result<Headline, CollectorError> {
                Ok(Headline {
                    published_date: parse_utc_timestamp("publishedAt", &article.published_at)?,
                    source: article.source.name,
                    title: article.title,
                    url: article.url,
                })
            })
            .collect::<Result<Vec<_>, CollectorError>>()?;

        to_record(&HeadlinesSnapshot { articles })
    }
}
