use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{error::FetchError, models::ExchangeRate};

pub const DEFAULT_RATE_API_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Attempt count, per-attempt timeout and backoff base.
/// Delay before attempt `i + 1` is `2^i * base_delay`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,

    // covers connect, headers and body of a single attempt
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            attempt_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    pub fn backoff(&self, attempt_index: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt_index)
    }
}

#[derive(Clone)]
pub struct RateFetcher {
    http: Client,
    url: String,
    retry: RetryPolicy,
}

impl RateFetcher {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder()
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn fetch_current_rate(&self) -> Result<ExchangeRate, FetchError> {
        info!("📡 Fetching current USD-BRL rate...");

        let body = self.get_with_retry().await?;

        let body = serde_json::from_slice::<AwesomeApiResponse>(&body)
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        let rate = body.into_rate()?;
        info!("📊 Current USD ask rate: {:.4} BRL", rate.ask);
        Ok(rate)
    }

    async fn get_with_retry(&self) -> Result<Vec<u8>, FetchError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last = None;

        for i in 0..attempts {
            match self.get_once().await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!("⚠️  Attempt {}/{} failed: {}", i + 1, attempts, e);
                    if !e.is_transient() {
                        return Err(e);
                    }
                    last = Some(e);
                }
            }

            if i + 1 < attempts {
                tokio::time::sleep(self.retry.backoff(i)).await;
            }
        }

        Err(FetchError::RetriesExhausted {
            attempts,
            last: last.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    async fn get_once(&self) -> Result<Vec<u8>, FetchError> {
        let attempt = async {
            let res = self.http.get(&self.url).send().await?;

            if !res.status().is_success() {
                return Err(FetchError::Status(res.status().to_string()));
            }

            Ok(res.bytes().await?.to_vec())
        };

        tokio::time::timeout(self.retry.attempt_timeout, attempt)
            .await
            .map_err(|_| FetchError::Timeout(self.retry.attempt_timeout))?
    }
}

#[derive(Debug, Deserialize)]
struct AwesomeApiResponse {
    #[serde(rename = "USDBRL")]
    usdbrl: Option<AwesomeApiQuote>,
}

// Every numeric field arrives string-encoded.
#[derive(Debug, Deserialize)]
struct AwesomeApiQuote {
    ask: String,
    bid: String,
    high: String,
    low: String,
    timestamp: String,

    #[serde(default)]
    name: String,
}

impl AwesomeApiResponse {
    fn into_rate(self) -> Result<ExchangeRate, FetchError> {
        let q = self
            .usdbrl
            .ok_or_else(|| FetchError::InvalidResponse("missing USDBRL data".to_string()))?;

        let ask = parse_price(&q.ask, "ask")?;
        let bid = parse_price(&q.bid, "bid")?;
        let high = parse_price(&q.high, "high")?;
        let low = parse_price(&q.low, "low")?;

        let seconds = q
            .timestamp
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or(FetchError::InvalidNumber("timestamp"))?;

        let observed_at = seconds
            .checked_mul(1000)
            .ok_or(FetchError::InvalidNumber("timestamp"))?;

        Ok(ExchangeRate {
            ask,
            bid,
            high,
            low,
            observed_at,
            name: q.name,
        })
    }
}

fn parse_price(raw: &str, field: &'static str) -> Result<f64, FetchError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(FetchError::InvalidNumber(field)),
    }
}
