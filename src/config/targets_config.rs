//! What gets measured: repository, community and package identifiers.

use anyhow::{Context, Result};
use std::env;

/// Identifiers of the tracked project on each platform
#[derive(Debug, Clone)]
pub struct TargetsEnvConfig {
    pub github_owner: String,
    pub github_repo: String,
    pub subreddit: String,
    pub search_term: String,
    pub pypi_package: String,
    pub linkedin_company_id: String,
    pub discord_guild_id: String,
    pub youtube_channel_id: String,
    pub mailchimp_audience_id: String,
    pub videos_published_after: String,
    pub related_queries_limit: usize,
}

impl Default for TargetsEnvConfig {
    fn default() -> Self {
        Self {
            github_owner: "OpenBB-finance".to_string(),
            github_repo: "OpenBB".to_string(),
            subreddit: "openBB".to_string(),
            search_term: "openbb".to_string(),
            pypi_package: "openbb".to_string(),
            linkedin_company_id: "76491268".to_string(),
            discord_guild_id: "831165782750789672".to_string(),
            youtube_channel_id: "UCaeFEx-W16IuxRsHlM1ywBQ".to_string(),
            mailchimp_audience_id: "e8ecacb821".to_string(),
            videos_published_after: "2022-01-01T00:00:00Z".to_string(),
            related_queries_limit: 10,
        }
    }
}

impl TargetsEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            github_owner: env::var("GITHUB_OWNER").unwrap_or(defaults.github_owner),
            github_repo: env::var("GITHUB_REPO").unwrap_or(defaults.github_repo),
            subreddit: env::var("SUBREDDIT").unwrap_or(defaults.subreddit),
            search_term: env::var("SEARCH_TERM").unwrap_or(defaults.search_term),
            pypi_package: env::var("PYPI_PACKAGE").unwrap_or(defaults.pypi_package),
            linkedin_company_id: env::var("LINKEDIN_COMPANY_ID")
                .unwrap_or(defaults.linkedin_company_id),
            discord_guild_id: env::var("DISCORD_GUILD_ID").unwrap_or(defaults.discord_guild_id),
            youtube_channel_id: env::var("YOUTUBE_CHANNEL_ID")
                .unwrap_or(defaults.youtube_channel_id),
            mailchimp_audience_id: env::var("MAILCHIMP_AUDIENCE_ID")
                .unwrap_or(defaults.mailchimp_audience_id),
            videos_published_after: env::var("VIDEOS_PUBLISHED_AFTER")
                .unwrap_or(defaults.videos_published_after),
            related_queries_limit: env::var("RELATED_QUERIES_LIMIT")
                .unwrap_or_else(|_| defaults.related_queries_limit.to_string())
                .parse::<usize>()
                .context("Failed to parse RELATED_QUERIES_LIMIT")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_defaults() {
        let config = TargetsEnvConfig::default();
        assert_eq!(config.github_owner, "OpenBB-finance");
        assert_eq!(config.github_repo, "OpenBB");
        assert_eq!(config.related_queries_limit, 10);
    }
}
