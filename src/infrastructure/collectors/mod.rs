//! Concrete metric sources.
//!
//! Each collector performs one request, a few sequential ones, or a bounded
//! pagination loop, and returns a normalized [`Record`].

pub mod discord;
pub mod github;
pub mod google_trends;
pub mod linkedin;
pub mod mailchimp;
pub mod news_api;
pub mod pypi;
pub mod reddit;
pub mod youtube;

pub use discord::DiscordCollector;
pub use github::{GithubRepositoryCollector, ReleaseDownloadsCollector};
pub use google_trends::{
    GoogleTrendsClient, InterestByRegionCollector, InterestOverTimeCollector,
    RelatedQueriesCollector,
};
pub use linkedin::LinkedinCollector;
pub use mailchimp::NewsletterCollector;
pub use news_api::HeadlinesCollector;
pub use pypi::PypiDownloadsCollector;
pub use reddit::RedditCollector;
pub use youtube::{YoutubeChannelCollector, YoutubeVideosCollector};

use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

/// Converts a typed snapshot into a record.
pub(crate) fn to_record<T: Serialize>(snapshot: &T) -> Result<Record, CollectorError> {
    match serde_json::to_value(snapshot)? {
        Value::Object(record) => Ok(record),
        other => Err(CollectorError::decode(
            "snapshot",
            format!("expected an object, got {}", other),
        )),
    }
}

/// Returns the credential value or a `MissingCredential` error naming `name`.
pub(crate) fn require<'a>(
    value: &'a Option<String>,
    name: &'static str,
) -> Result<&'a str, CollectorError> {
    value
        .as_deref()
        .ok_or(CollectorError::MissingCredential { name })
}

/// Parses `2023-04-01T12:30:00Z` into Unix seconds (UTC).
pub(crate) fn parse_utc_timestamp(
    field: &'static str,
    value: &str,
) -> Result<i64, CollectorError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%SZ")
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| CollectorError::parse(field, format!("{} ({})", value, e)))
}
