use crate::domain::errors::CollectorError;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Every outbound call fails after this long instead of hanging.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the HTTP client shared by all collectors.
    ///
    /// No retry middleware: a failed call is reported once and the collector
    /// is marked as failed for this run.
    pub fn create_client() -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(5)
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")
    }
}

/// Sends `request` and returns the body, failing on non-2xx statuses.
///
/// Errors never carry the request URL's query string.
pub async fn fetch_text(request: RequestBuilder) -> Result<String, CollectorError> {
    let response = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::Status {
            url: redact_query(response.url()),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await.map_err(reqwest::Error::without_url)?)
}

/// Sends `request` and decodes the JSON body into `T`.
pub async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    origin: &'static str,
) -> Result<T, CollectorError> {
    let body = fetch_text(request).await?;
    serde_json::from_str(&body).map_err(|e| CollectorError::decode(origin, e))
}

// API keys travel as query parameters for some upstreams
fn redact_query(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
