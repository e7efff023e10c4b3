//! YouTube channel statistics and latest video mentions.

use super::{parse_utc_timestamp, require, to_record};
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    channel_title: String,
    title: String,
    publish_time: String,
}

#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    statistics: ChannelStatistics,
}

// The API encodes counters as strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
    view_count: String,
}

#[derive(Debug, Serialize)]
struct LatestVideoSnapshot {
    channel: String,
    title: String,
    video_id: String,
    published_date: i64,
}

#[derive(Debug, Serialize)]
struct ChannelSnapshot {
    subscribers: Option<u64>,
    total_views: u64,
}

/// Most recent video matching the search term.
pub struct YoutubeVideosCollector {
    client: Client,
    base_url: String,
    token: Option<String>,
    search_term: String,
    published_after: String,
}

impl YoutubeVideosCollector {
    pub fn new(
        client: Client,
        base_url: String,
        token: Option<String>,
        search_term: String,
        published_after: String,
    ) -> Self {
        Self {
            client,
            base_url,
            token,
            search_term,
            published_after,
        }
    }
}

#[async_trait]
impl MetricsCollector for YoutubeVideosCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let key = require(&self.token, "YOUTUBE_TOKEN")?;
        let request = self.client.get(format!("{}/search", self.base_url)).query(&[
            ("part", "snippet"),
            ("q", self.search_term.as_str()),
            ("publishedAfter", self.published_after.as_str()),
            ("order", "date"),
            ("type", "video"),
            ("key", key),
        ]);

        let body: SearchResponse = fetch_json(request, "youtube search").await?;
        // Results are ordered newest first
        let latest = body
            .items
            .into_iter()
            .next()
            .ok_or(CollectorError::EmptyResult {
                origin: "youtube search",
            })?;

        to_record(&LatestVideoSnapshot {
            published_date: parse_utc_timestamp("publishTime", &latest.snippet.publish_time)?,
            channel: latest.snippet.channel_title,
            title: latest.snippet.title,
            video_id: latest.id.video_id,
        })
    }
}

/// Subscriber and view counts of a channel.
pub struct YoutubeChannelCollector {
    client: Client,
    base_url: String,
    token: Option<String>,
    channel_id: String,
}

impl YoutubeChannelCollector {
    pub fn new(client: Client, base_url: String, token: Option<String>, channel_id: String) -> Self {
        Self {
            client,
            base_url,
            token,
            channel_id,
        }
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u64, CollectorError> {
    value
        .parse::<u64>()
        .map_err(|e| CollectorError::parse(field, format!("{} ({})", value, e)))
}

#[async_trait]
impl MetricsCollector for YoutubeChannelCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let key = require(&self.token, "YOUTUBE_TOKEN")?;
        let request = self.client.get(format!("{}/channels", self.base_url)).query(&[
            ("part", "statistics"),
            ("id", self.channel_id.as_str()),
            ("key", key),
        ]);

        let body: ChannelsResponse = fetch_json(request, "youtube channels").await?;
        let channel = body
            .items
            .into_iter()
            .next()
            .ok_or(CollectorError::EmptyResult {
                origin: "youtube channels",
            })?;

        // Hidden subscriber counts are omitted by the API
        let subscribers = channel
            .statistics
            .subscriber_count
            .as_deref()
            .map(|count| parse_count("subscriberCount", count))
            .transpose()?;

        to_record(&ChannelSnapshot {
            subscribers,
            total_views: parse_count("viewCount", &channel.statistics.view_count)?,
        })
    }
}
