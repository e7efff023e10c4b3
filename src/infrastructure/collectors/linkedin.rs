use super::to_record;
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_text;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::sync::LazyLock;

const FOLLOWER_COUNT_SELECTOR: &str = ".follower-count";
const FOLLOWER_COUNT_CLASS: &str = "follower-count";

// Opening tags that carry a class attribute; group 1 is the attribute value
static CLASSED_OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<[a-z0-9]+\s(?:[^>]*?\s)?class\s*=\s*["']([^"']*)["'][^>]*>"#)
        .expect("opening tag pattern is valid")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

#[derive(Debug, Serialize)]
struct LinkedinSnapshot {
    total_followers: u64,
}

/// Extracts the follower counter text from the company follow widget.
///
/// The first element whose class list contains the exact `follower-count`
/// token wins; look-alike tokens such as `follower-count-label` are skipped.
pub fn extract_follower_count(html: &str) -> Result<u64, CollectorError> {
    let opening = CLASSED_OPENING_TAG
        .captures_iter(html)
        .find(|captures| {
            captures[1]
                .split_whitespace()
                .any(|class| class == FOLLOWER_COUNT_CLASS)
        })
        .and_then(|captures| captures.get(0))
        .ok_or(CollectorError::Scrape {
            selector: FOLLOWER_COUNT_SELECTOR,
        })?;

    let rest = &html[opening.end()..];
    let inner = rest.find("</").map_or(rest, |end| &rest[..end]);
    let text = TAG.replace_all(inner, "");
    let digits = text.trim().replace(',', "");

    digits
        .parse::<u64>()
        .map_err(|e| CollectorError::parse("follower-count", format!("{:?} ({})", digits, e)))
}

/// Follower count scraped from the rendered company follow widget.
pub struct LinkedinCollector {
    client: Client,
    base_url: String,
    company_id: String,
}

impl LinkedinCollector {
    pub fn new(client: Client, base_url: String, company_id: String) -> Self {
        Self {
            client,
            base_url,
            company_id,
        }
    }
}

#[async_trait]
impl MetricsCollector for LinkedinCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let request = self
            .client
            .get(format!("{}/pages-extensions/FollowCompany", self.base_url))
            .query(&[("id", self.company_id.as_str()), ("counter", "bottom")]);

        let html = fetch_text(request).await?;
        to_record(&LinkedinSnapshot {
            total_followers: extract_follower_count(&html)?,
        })
    }
}
