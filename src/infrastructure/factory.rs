use crate::application::collector_registry::CollectorRegistry;
use crate::config::Config;
use crate::infrastructure::collectors::{
    DiscordCollector, GithubRepositoryCollector, GoogleTrendsClient, HeadlinesCollector,
    InterestByRegionCollector, InterestOverTimeCollector, LinkedinCollector, NewsletterCollector,
    PypiDownloadsCollector, RedditCollector, RelatedQueriesCollector, ReleaseDownloadsCollector,
    YoutubeChannelCollector, YoutubeVideosCollector,
};
use reqwest::Client;
use std::sync::Arc;

/// Category names written to the history file.
pub mod categories {
    pub const NEWSLETTER: &str = "newsletter";
    pub const TERMINAL_DOWNLOADS: &str = "terminal_downloads";
    pub const REDDIT: &str = "reddit";
    pub const HEADLINES: &str = "headlines";
    pub const YOUTUBE_VIDEOS: &str = "youtube_videos";
    pub const LINKEDIN: &str = "linkedin";
    pub const DISCORD: &str = "discord";
    pub const GITHUB: &str = "github";
    pub const YOUTUBE: &str = "youtube";
    pub const GOOGLE_REGIONS: &str = "google_regions";
    pub const GOOGLE_QUERIES: &str = "google_queries";
    pub const GOOGLE_INTEREST: &str = "google_interest";
    pub const PIPY: &str = "pipy";

    /// Default registration order.
    pub const ALL: [&str; 13] = [
        NEWSLETTER,
        TERMINAL_DOWNLOADS,
        REDDIT,
        HEADLINES,
        YOUTUBE_VIDEOS,
        LINKEDIN,
        DISCORD,
        GITHUB,
        YOUTUBE,
        GOOGLE_REGIONS,
        GOOGLE_QUERIES,
        GOOGLE_INTEREST,
        PIPY,
    ];
}

pub struct CollectorFactory;

impl CollectorFactory {
    /// Builds the registry of every source polled on a run.
    pub fn create_registry(config: &Config, client: Client) -> CollectorRegistry {
        let credentials = &config.credentials;
        let targets = &config.targets;
        let endpoints = &config.endpoints;

        let trends = Arc::new(GoogleTrendsClient::new(
            client.clone(),
            endpoints.google_trends.clone(),
        ));

        CollectorRegistry::new()
            .with(
                categories::NEWSLETTER,
                Arc::new(NewsletterCollector::new(
                    client.clone(),
                    endpoints.mailchimp.clone(),
                    credentials.mailchimp.clone(),
                    targets.mailchimp_audience_id.clone(),
                )),
            )
            .with(
                categories::TERMINAL_DOWNLOADS,
                Arc::new(ReleaseDownloadsCollector::new(
                    client.clone(),
                    endpoints.github.clone(),
                    targets.github_owner.clone(),
                    targets.github_repo.clone(),
                )),
            )
            .with(
                categories::REDDIT,
                Arc::new(RedditCollector::new(
                    client.clone(),
                    endpoints.reddit_auth.clone(),
                    endpoints.reddit_api.clone(),
                    credentials.reddit.clone(),
                    targets.subreddit.clone(),
                )),
            )
            .with(
                categories::HEADLINES,
                Arc::new(HeadlinesCollector::new(
                    client.clone(),
                    endpoints.newsapi.clone(),
                    credentials.newsapi_token.clone(),
                    targets.search_term.clone(),
                )),
            )
            .with(
                categories::YOUTUBE_VIDEOS,
                Arc::new(YoutubeVideosCollector::new(
                    client.clone(),
                    endpoints.youtube.clone(),
                    credentials.youtube_token.clone(),
                    targets.search_term.clone(),
                    targets.videos_published_after.clone(),
                )),
            )
            .with(
                categories::LINKEDIN,
                Arc::new(LinkedinCollector::new(
                    client.clone(),
                    endpoints.linkedin.clone(),
                    targets.linkedin_company_id.clone(),
                )),
            )
            .with(
                categories::DISCORD,
                Arc::new(DiscordCollector::new(
                    client.clone(),
                    endpoints.discord.clone(),
                    credentials.discord_token.clone(),
                    targets.discord_guild_id.clone(),
                )),
            )
            .with(
                categories::GITHUB,
                Arc::new(GithubRepositoryCollector::new(
                    client.clone(),
                    endpoints.github.clone(),
                    targets.github_owner.clone(),
                    targets.github_repo.clone(),
                )),
            )
            .with(
                categories::YOUTUBE,
                Arc::new(YoutubeChannelCollector::new(
                    client.clone(),
                    endpoints.youtube.clone(),
                    credentials.youtube_token.clone(),
                    targets.youtube_channel_id.clone(),
                )),
            )
            .with(
                categories::GOOGLE_REGIONS,
                Arc::new(InterestByRegionCollector::new(
                    trends.clone(),
                    targets.search_term.clone(),
                )),
            )
            .with(
                categories::GOOGLE_QUERIES,
                Arc::new(RelatedQueriesCollector::new(
                    trends.clone(),
                    targets.search_term.clone(),
                    targets.related_queries_limit,
                )),
            )
            .with(
                categories::GOOGLE_INTEREST,
                Arc::new(InterestOverTimeCollector::new(
                    trends,
                    targets.search_term.clone(),
                )),
            )
            .with(
                categories::PIPY,
                Arc::new(PypiDownloadsCollector::new(
                    client,
                    endpoints.pypistats.clone(),
                    targets.pypi_package.clone(),
                )),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = CollectorFactory::create_registry(&Config::default(), Client::new());
        let registered: Vec<&str> = registry.categories().collect();
        assert_eq!(registered, categories::ALL.to_vec());
    }
}
