use crate::config::Settings;
use crate::enrich::types::{
    EarningsEvent, EarningsResponse, InfoBundle, PriceBar, PriceHistoryResponse,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

const PRICES_PATH: &str = "/v1/prices";
const INFO_PATH: &str = "/v1/info";
const EARNINGS_PATH: &str = "/v1/earnings";
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Best-effort market data source. Any call may fail or come back empty.
#[async_trait::async_trait]
pub trait MarketDataClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Daily closes in `[start, end]`, ascending by date.
    async fn price_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>>;

    async fn info(&self, ticker: &str) -> Result<InfoBundle>;

    async fn earnings(&self, ticker: &str) -> Result<Vec<EarningsEvent>>;
}

#[derive(Debug, Clone)]
pub struct ProviderHttpError {
    pub endpoint: &'static str,
    pub status: u16,
    pub body: String,
}

impl ProviderHttpError {
    pub fn is_retryable(&self) -> bool {
        self.status == 429 || (500..600).contains(&self.status)
    }
}

impl fmt::Display for ProviderHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "market data HTTP {} (endpoint={}): {}",
            self.status, self.endpoint, self.body
        )
    }
}

impl std::error::Error for ProviderHttpError {}

/// Attempts and exponential backoff for provider calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_backoff: Duration::from_secs(1),
            max_backoff: MAX_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_attempts: settings.market_data_retries.max(1),
            base_backoff: settings.market_data_backoff,
            ..Self::default()
        }
    }

    /// Delay after the 1-based `attempt` failed.
    pub fn delay(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(16);
        self.base_backoff
            .saturating_mul(1 << shift)
            .min(self.max_backoff)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or attempts run out.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(v) => return Ok(v),
                Err(err) => {
                    if attempt >= self.max_attempts || !is_retryable(&err) {
                        return Err(err);
                    }
                    let backoff = self.delay(attempt);
                    tracing::warn!(
                        attempt,
                        ?backoff,
                        call = label,
                        error = %err,
                        "market data call failed; retrying"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

/// Transport failures, throttling and server errors are retried; bad payloads are not.
pub fn is_retryable(err: &anyhow::Error) -> bool {
    if let Some(http) = err.downcast_ref::<ProviderHttpError>() {
        return http.is_retryable();
    }
    if let Some(req) = err.downcast_ref::<reqwest::Error>() {
        return req.is_timeout() || req.is_connect() || req.is_request();
    }
    false
}

#[derive(Debug, Clone)]
pub struct HttpJsonMarketData {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl HttpJsonMarketData {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_market_data_base_url()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(settings.market_data_timeout)
            .build()
            .context("failed to build market data http client")?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.market_data_api_key.clone(),
            retry: RetryPolicy::from_settings(settings),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let res = self
            .http
            .get(self.url(endpoint))
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .with_context(|| format!("market data request to {endpoint} failed"))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read market data response")?;

        if !status.is_success() {
            return Err(ProviderHttpError {
                endpoint,
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        serde_json::from_str::<T>(&text)
            .with_context(|| format!("market data response from {endpoint} is not valid: {text}"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: Vec<(&str, String)>,
    ) -> Result<T> {
        self.retry
            .run(endpoint, || self.get_once::<T>(endpoint, &query))
            .await
    }
}

#[async_trait::async_trait]
impl MarketDataClient for HttpJsonMarketData {
    fn provider_name(&self) -> &'static str {
        "external_http_json"
    }

    async fn price_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        let resp: PriceHistoryResponse = self
            .get_json(
                PRICES_PATH,
                vec![
                    ("ticker", ticker.to_string()),
                    ("start", start.to_string()),
                    ("end", end.to_string()),
                ],
            )
            .await?;

        let mut bars: Vec<PriceBar> = resp
            .bars
            .into_iter()
            .filter(|b| b.close.is_finite() && b.close > 0.0)
            .collect();
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    async fn info(&self, ticker: &str) -> Result<InfoBundle> {
        self.get_json(INFO_PATH, vec![("ticker", ticker.to_string())])
            .await
    }

    async fn earnings(&self, ticker: &str) -> Result<Vec<EarningsEvent>> {
        let resp: EarningsResponse = self
            .get_json(EARNINGS_PATH, vec![("ticker", ticker.to_string())])
            .await?;
        Ok(resp.events)
    }
}
