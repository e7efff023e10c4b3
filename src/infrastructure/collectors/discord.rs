use super::{require, to_record};
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct GuildResponse {
    approximate_member_count: u64,
    approximate_presence_count: u64,
}

#[derive(Debug, Serialize)]
struct DiscordSnapshot {
    total_members: u64,
    active_members: u64,
}

/// Approximate member and online counts of a guild, read with a bot token.
pub struct DiscordCollector {
    client: Client,
    base_url: String,
    token: Option<String>,
    guild_id: String,
}

impl DiscordCollector {
    pub fn new(client: Client, base_url: String, token: Option<String>, guild_id: String) -> Self {
        Self {
            client,
            base_url,
            token,
            guild_id,
        }
    }
}

#[async_trait]
impl MetricsCollector for DiscordCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let token = require(&self.token, "DISCORD_TOKEN")?;
        let request = self
            .client
            .get(format!("{}/guilds/{}", self.base_url, self.guild_id))
            .query(&[("with_counts", "true")])
            .header(AUTHORIZATION, format!("Bot {}", token));

        let guild: GuildResponse = fetch_json(request, "discord").await?;
        to_record(&DiscordSnapshot {
            total_members: guild.approximate_member_count,
            active_members: guild.approximate_presence_count,
        })
    }
}
