//! GitHub repository activity and release download counts.

use super::to_record;
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page size used when listing contributors.
pub const CONTRIBUTORS_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct ReleaseResponse {
    tag_name: String,
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    download_count: u64,
}

#[derive(Debug, Serialize)]
struct RepositorySnapshot {
    contributors: u64,
    stars: u64,
    forks: u64,
    open_pr: u64,
    closed_pr: u64,
    issues: u64,
    closed_issues: u64,
}

#[derive(Debug, Serialize)]
struct ReleaseDownloadsSnapshot {
    tag_name: String,
    macos: u64,
    windows: u64,
}

/// Shared plumbing for calls against one repository.
#[derive(Clone)]
struct RepositoryApi {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl RepositoryApi {
    fn repo_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url, self.owner, self.repo, suffix
        )
    }

    async fn search_count(&self, qualifiers: &str) -> Result<u64, CollectorError> {
        let query = format!("repo:{}/{} {}", self.owner, self.repo, qualifiers);
        let request = self
            .client
            .get(format!("{}/search/issues", self.base_url))
            .query(&[("q", query.as_str())]);
        let body: SearchResponse = fetch_json(request, "github search").await?;
        Ok(body.total_count)
    }
}

/// Contributors, stars, forks, issues and pull requests of a repository.
pub struct GithubRepositoryCollector {
    api: RepositoryApi,
}

impl GithubRepositoryCollector {
    pub fn new(client: Client, base_url: String, owner: String, repo: String) -> Self {
        Self {
            api: RepositoryApi {
                client,
                base_url,
                owner,
                repo,
            },
        }
    }

    /// Sums contributor pages until the first page shorter than
    /// [`CONTRIBUTORS_PAGE_SIZE`]; no trailing request is made after it.
    pub async fn count_contributors(&self) -> Result<u64, CollectorError> {
        let url = self.api.repo_url("/contributors");
        let per_page = CONTRIBUTORS_PAGE_SIZE.to_string();
        let mut total = 0u64;
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let request = self.api.client.get(&url).query(&[
                ("per_page", per_page.as_str()),
                ("anon", "false"),
                ("page", page_param.as_str()),
            ]);
            let contributors: Vec<serde_json::Value> =
                fetch_json(request, "github contributors").await?;
            debug!("Contributors page {}: {} entries", page, contributors.len());

            total += contributors.len() as u64;
            if contributors.len() < CONTRIBUTORS_PAGE_SIZE {
                return Ok(total);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl MetricsCollector for GithubRepositoryCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let contributors = self.count_contributors().await?;

        let repository: RepositoryResponse =
            fetch_json(self.api.client.get(self.api.repo_url("")), "github repository").await?;

        let closed_issues = self.api.search_count("is:issue is:closed").await?;
        let open_pr = self.api.search_count("is:pr is:open").await?;
        let closed_pr = self.api.search_count("is:pr is:closed").await?;

        to_record(&RepositorySnapshot {
            contributors,
            stars: repository.stargazers_count,
            forks: repository.forks_count,
            open_pr,
            closed_pr,
            issues: repository.open_issues_count,
            closed_issues,
        })
    }
}

/// Installer downloads of the latest release, split by platform.
pub struct ReleaseDownloadsCollector {
    api: RepositoryApi,
}

impl ReleaseDownloadsCollector {
    pub fn new(client: Client, base_url: String, owner: String, repo: String) -> Self {
        Self {
            api: RepositoryApi {
                client,
                base_url,
                owner,
                repo,
            },
        }
    }
}

#[async_trait]
impl MetricsCollector for ReleaseDownloadsCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        let release: ReleaseResponse = fetch_json(
            self.api.client.get(self.api.repo_url("/releases/latest")),
            "github release",
        )
        .await?;

        let mut snapshot = ReleaseDownloadsSnapshot {
            tag_name: release.tag_name,
            macos: 0,
            windows: 0,
        };
        for asset in &release.assets {
            if asset.name.ends_with(".dmg") {
                snapshot.macos += asset.download_count;
            } else if asset.name.ends_with(".exe") {
                snapshot.windows += asset.download_count;
            }
        }

        to_record(&snapshot)
    }
}
