//! Configuration module for project metrics.
//!
//! Configuration is read from environment variables once at startup and
//! passed explicitly into the collector factory and the runner. It is
//! organized by concern: Credentials, Targets, Endpoints and Runner.

mod credentials_config;
mod endpoints_config;
mod runner_config;
mod targets_config;

pub use credentials_config::{CredentialsEnvConfig, MailchimpConfig, PostgresConfig, RedditConfig};
pub use endpoints_config::{EndpointsEnvConfig, MAILCHIMP_ZONE_PLACEHOLDER};
pub use runner_config::RunnerEnvConfig;
pub use targets_config::TargetsEnvConfig;

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub credentials: CredentialsEnvConfig,
    pub targets: TargetsEnvConfig,
    pub endpoints: EndpointsEnvConfig,
    pub runner: RunnerEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing credentials are not an error here.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            credentials: CredentialsEnvConfig::from_env(),
            targets: TargetsEnvConfig::from_env().context("Failed to load targets config")?,
            endpoints: EndpointsEnvConfig::from_env(),
            runner: RunnerEnvConfig::from_env().context("Failed to load runner config")?,
        })
    }
}
