//! Credential configuration parsing from environment variables.
//!
//! Nothing here is validated at startup. A collector that needs an absent
//! credential fails when it runs.

use std::env;

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Postgres connection settings (not read by any collector)
#[derive(Debug, Clone, Default)]
pub struct PostgresConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub database: Option<String>,
}

impl PostgresConfig {
    pub fn from_env() -> Self {
        Self {
            username: optional_var("POSTGRES_USERNAME"),
            password: optional_var("POSTGRES_PASSWORD"),
            url: optional_var("POSTGRES_URL"),
            database: optional_var("POSTGRES_DB"),
        }
    }
}

/// Reddit application credentials
#[derive(Debug, Clone, Default)]
pub struct RedditConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: Option<String>,
}

impl RedditConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: optional_var("REDDIT_CLIENT_ID"),
            client_secret: optional_var("REDDIT_CLIENT_SECRET"),
            user_agent: optional_var("REDDIT_USER_AGENT"),
        }
    }
}

/// Mailchimp API key and data-center zone
#[derive(Debug, Clone, Default)]
pub struct MailchimpConfig {
    pub api_key: Option<String>,
    pub zone: Option<String>,
}

impl MailchimpConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: optional_var("MAILCHIMP_API_KEY"),
            zone: optional_var("MAILCHIMP_ZONE"),
        }
    }
}

/// Aggregated credentials for every upstream
#[derive(Debug, Clone, Default)]
pub struct CredentialsEnvConfig {
    pub postgres: PostgresConfig,
    pub reddit: RedditConfig,
    pub mailchimp: MailchimpConfig,
    pub newsapi_token: Option<String>,
    pub youtube_token: Option<String>,
    pub discord_token: Option<String>,
}

impl CredentialsEnvConfig {
    pub fn from_env() -> Self {
        Self {
            postgres: PostgresConfig::from_env(),
            reddit: RedditConfig::from_env(),
            mailchimp: MailchimpConfig::from_env(),
            newsapi_token: optional_var("NEWSAPI_TOKEN"),
            youtube_token: optional_var("YOUTUBE_TOKEN"),
            discord_token: optional_var("DISCORD_TOKEN"),
        }
    }
}
