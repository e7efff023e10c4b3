use super::{require, to_record};
use crate::config::{MAILCHIMP_ZONE_PLACEHOLDER, MailchimpConfig};
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ListMembersResponse {
    total_items: u64,
}

#[derive(Debug, Serialize)]
struct NewsletterSnapshot {
    total_subscribers: u64,
}

/// Newsletter audience size from the Mailchimp list-members endpoint.
pub struct NewsletterCollector {
    client: Client,
    base_url: String,
    credentials: MailchimpConfig,
    audience_id: String,
}

impl NewsletterCollector {
    /// `base_url` may contain `{zone}`, filled from the configured data center.
    pub fn new(
        client: Client,
        base_url: String,
        credentials: MailchimpConfig,
        audience_id: String,
    ) -> Self {
        Self {
            client,
            base_url,
            credentials,
            audience_id,
        }
    }

    fn members_url(&self) -> Result<String, CollectorError> {
        let base = if self.base_url.contains(MAILCHIMP_ZONE_PLACEHOLDER) {
            let zone = require(&self.credentials.zone, "MAILCHIMP_ZONE")?;
            self.base_url.replace(MAILCHIMP_ZONE_PLACEHOLDER, zone)
        } else {
            self.base_url.clone()
        };
        Ok(format!("{}/3.0/lists/{}/members", base, self.audience_id))
    }
}

#[async_trait]
impl MetricsCollector for NewsletterCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let api_key = require(&self.credentials.api_key, "MAILCHIMP_API_KEY")?;
        let request = self
            .client
            .get(self.members_url()?)
            .basic_auth("user", Some(api_key));

        let body: ListMembersResponse = fetch_json(request, "mailchimp").await?;
        to_record(&NewsletterSnapshot {
            total_subscribers: body.total_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(base_url: &str, zone: Option<&str>) -> NewsletterCollector {
        NewsletterCollector::new(
            Client::new(),
            base_url.to_string(),
            MailchimpConfig {
                api_key: Some("key".to_string()),
                zone: zone.map(str::to_string),
            },
            "abc123".to_string(),
        )
    }

    #[test]
    fn test_zone_is_substituted() {
        let url = collector("https://{zone}.api.mailchimp.com", Some("us6"))
            .members_url()
            .unwrap();
        assert_eq!(url, "https://us6.api.mailchimp.com/3.0/lists/abc123/members");
    }

    #[test]
    fn test_missing_zone_fails() {
        let err = collector("https://{zone}.api.mailchimp.com", None)
            .members_url()
            .unwrap_err();
        assert!(err.to_string().contains("MAILCHIMP_ZONE"));
    }
}
