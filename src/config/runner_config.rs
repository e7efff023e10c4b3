//! Run-level settings: where history lives and how collectors are scheduled.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunnerEnvConfig {
    pub history_path: PathBuf,
    pub max_concurrency: usize,
}

impl Default for RunnerEnvConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("metrics.json"),
            max_concurrency: 1,
        }
    }
}

impl RunnerEnvConfig {
    pub fn from_env() -> Result<Self> {
        let max_concurrency = env::var("METRICS_MAX_CONCURRENCY")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<usize>()
            .context("Failed to parse METRICS_MAX_CONCURRENCY")?;
        if max_concurrency == 0 {
            anyhow::bail!("METRICS_MAX_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            history_path: env::var("METRICS_HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("metrics.json")),
            max_concurrency,
        })
    }
}
