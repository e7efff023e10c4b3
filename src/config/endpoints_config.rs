//! Upstream base URLs.
//!
//! Defaults point at the public services; every value can be overridden,
//! which is how tests route collectors to a local mock server.

use std::env;

/// Placeholder replaced with `MAILCHIMP_ZONE` in [`EndpointsEnvConfig::mailchimp`].
pub const MAILCHIMP_ZONE_PLACEHOLDER: &str = "{zone}";

#[derive(Debug, Clone)]
pub struct EndpointsEnvConfig {
    pub github: String,
    pub mailchimp: String,
    pub reddit_auth: String,
    pub reddit_api: String,
    pub newsapi: String,
    pub youtube: String,
    pub linkedin: String,
    pub discord: String,
    pub pypistats: String,
    pub google_trends: String,
}

impl Default for EndpointsEnvConfig {
    fn default() -> Self {
        Self {
            github: "https://api.github.com".to_string(),
            mailchimp: "https://{zone}.api.mailchimp.com".to_string(),
            reddit_auth: "https://www.reddit.com".to_string(),
            reddit_api: "https://oauth.reddit.com".to_string(),
            newsapi: "https://newsapi.org".to_string(),
            youtube: "https://youtube.googleapis.com/youtube/v3".to_string(),
            linkedin: "https://www.linkedin.com".to_string(),
            discord: "https://discord.com/api/v10".to_string(),
            pypistats: "https://pypistats.org".to_string(),
            google_trends: "https://trends.google.com".to_string(),
        }
    }
}

impl EndpointsEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            github: env::var("GITHUB_API_URL").unwrap_or(defaults.github),
            mailchimp: env::var("MAILCHIMP_API_URL").unwrap_or(defaults.mailchimp),
            reddit_auth: env::var("REDDIT_AUTH_URL").unwrap_or(defaults.reddit_auth),
            reddit_api: env::var("REDDIT_API_URL").unwrap_or(defaults.reddit_api),
            newsapi: env::var("NEWSAPI_URL").unwrap_or(defaults.newsapi),
            youtube: env::var("YOUTUBE_API_URL").unwrap_or(defaults.youtube),
            linkedin: env::var("LINKEDIN_URL").unwrap_or(defaults.linkedin),
            discord: env::var("DISCORD_API_URL").unwrap_or(defaults.discord),
            pypistats: env::var("PYPISTATS_URL").unwrap_or(defaults.pypistats),
            google_trends: env::var("GOOGLE_TRENDS_URL").unwrap_or(defaults.google_trends),
        }
    }

    /// Same endpoints with every base URL pointing at `base`.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            github: base.clone(),
            mailchimp: base.clone(),
            reddit_auth: base.clone(),
            reddit_api: base.clone(),
            newsapi: base.clone(),
            youtube: base.clone(),
            linkedin: base.clone(),
            discord: base.clone(),
            pypistats: base.clone(),
            google_trends: base,
        }
    }
}
