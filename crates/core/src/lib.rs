pub mod analytics;
pub mod domain;
pub mod enrich;
pub mod taxonomy;
pub mod text;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_RETRIES: u32 = 3;
    const DEFAULT_BACKOFF_MS: u64 = 1000;
    const DEFAULT_CONCURRENCY: usize = 10;
    const DEFAULT_PROGRESS_EVERY: usize = 25;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub market_data_base_url: Option<String>,
        pub market_data_api_key: Option<String>,
        pub market_data_timeout: Duration,
        pub market_data_retries: u32,
        pub market_data_backoff: Duration,
        pub enrich_concurrency: usize,
        pub enrich_progress_every: usize,
        pub manager_weights: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                market_data_base_url: std::env::var("MARKET_DATA_BASE_URL").ok(),
                market_data_api_key: std::env::var("MARKET_DATA_API_KEY").ok(),
                market_data_timeout: Duration::from_secs(
                    env_parse("MARKET_DATA_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
                ),
                market_data_retries: env_parse("MARKET_DATA_RETRIES").unwrap_or(DEFAULT_RETRIES),
                market_data_backoff: Duration::from_millis(
                    env_parse("MARKET_DATA_BACKOFF_MS").unwrap_or(DEFAULT_BACKOFF_MS),
                ),
                enrich_concurrency: env_parse("ENRICH_CONCURRENCY").unwrap_or(DEFAULT_CONCURRENCY),
                enrich_progress_every: env_parse("ENRICH_PROGRESS_EVERY")
                    .unwrap_or(DEFAULT_PROGRESS_EVERY),
                manager_weights: std::env::var("MANAGER_WEIGHTS")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn require_market_data_base_url(&self) -> anyhow::Result<&str> {
            self.market_data_base_url
                .as_deref()
                .context("MARKET_DATA_BASE_URL is required")
        }
    }

    fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
    }
}
