use super::{require, to_record};
use crate::config::RedditConfig;
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AboutResponse {
    data: SubredditData,
}

#[derive(Debug, Deserialize)]
struct SubredditData {
    subscribers: u64,
}

#[derive(Debug, Serialize)]
struct RedditSnapshot {
    total_followers: u64,
}

/// Subreddit subscriber count using an application-only OAuth token.
pub struct RedditCollector {
    client: Client,
    auth_url: String,
    api_url: String,
    credentials: RedditConfig,
    subreddit: String,
}

impl RedditCollector {
    pub fn new(
        client: Client,
        auth_url: String,
        api_url: String,
        credentials: RedditConfig,
        subreddit: String,
    ) -> Self {
        Self {
            client,
            auth_url,
            api_url,
            credentials,
            subreddit,
        }
    }

    async fn access_token(&self, user_agent: &str) -> Result<String, CollectorError> {
        let client_id = require(&self.credentials.client_id, "REDDIT_CLIENT_ID")?;
        let client_secret = require(&self.credentials.client_secret, "REDDIT_CLIENT_SECRET")?;

        let request = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_url))
            .basic_auth(client_id, Some(client_secret))
            .header(USER_AGENT, user_agent)
            .form(&[("grant_type", "client_credentials")]);

        let token: TokenResponse = fetch_json(request, "reddit token").await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl MetricsCollector for RedditCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let user_agent = require(&self.credentials.user_agent, "REDDIT_USER_AGENT")?;
        let token = self.access_token(user_agent).await?;

        let request = self
            .client
            .get(format!("{}/r/{}/about", self.api_url, self.subreddit))
            .bearer_auth(token)
            .header(USER_AGENT, user_agent);
        let about: AboutResponse = fetch_json(request, "reddit").await?;

        to_record(&RedditSnapshot {
            total_followers: about.data.subscribers,
        })
    }
}
