use crate::config;
use crate::models::{ChartResponse, OptionChainResponse, OptionChainResult};
use anyhow::{Context, Result};
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;
use tracing::warn;

// -----------------------------------------------
// CLIENT WRAPPER WITH SESSION STATE
// -----------------------------------------------
pub struct MarketClient {
    client: Client,
    warmed_up: Arc<RwLock<bool>>,
}

impl MarketClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            warmed_up: Arc::new(RwLock::new(false)),
        })
    }

    /// Warmup session cookies (only once per client)
    async fn warmup_if_needed(&self) -> Result<()> {
        if *self.warmed_up.read().await {
            return Ok(());
        }

        let mut warmed = self.warmed_up.write().await;
        if !*warmed {
            let _ = self
                .client
                .get(config::YAHOO_WARMUP_URL)
                .header("Accept", "text/html")
                .send()
                .await
                .context("Failed to warm up market data session")?;

            tokio::time::sleep(Duration::from_millis(config::WARMUP_DELAY_MS)).await;
            *warmed = true;
        }

        Ok(())
    }

    /// Generic retry fetch with better error handling
    async fn fetch_json(&self, url: &str) -> Result<String> {
        self.warmup_if_needed().await?;

        let backoff = ExponentialBackoff::from_millis(config::RETRY_BASE_DELAY_MS)
            .factor(config::RETRY_FACTOR)
            .max_delay(Duration::from_secs(config::RETRY_MAX_DELAY_SECS))
            .take(config::RETRY_MAX_ATTEMPTS);

        Retry::spawn(backoff, || async {
            let res = self
                .client
                .get(url)
                .header("X-Requested-With", "XMLHttpRequest")
                .send()
                .await
                .context("Request send failed")?;

            let status = res.status();

            if status.is_success() {
                let text = res.text().await.context("Failed to read body")?;

                // Validate JSON
                let trimmed = text.trim();
                if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                    let preview: String = text.chars().take(200).collect();
                    anyhow::bail!("Non-JSON response: {}", preview);
                }

                Ok(text)
            } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                // Retry on server errors and rate limits
                anyhow::bail!("Retryable error: {}", status)
            } else {
                // Fail fast on client errors
                let body = res.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                anyhow::bail!("Client error {}: {}", status, preview)
            }
        })
        .await
    }

    // -----------------------------------------------
    // SPOT PRICE
    // -----------------------------------------------
    pub async fn fetch_spot(&self, symbol: &str) -> Result<f64> {
        let url = config::chart_url(symbol);
        let text = self.fetch_json(&url).await?;

        let chart: ChartResponse =
            serde_json::from_str(&text).context("Failed to parse chart response")?;

        let result = chart
            .chart
            .result
            .first()
            .with_context(|| format!("Empty chart result for {}", symbol))?;

        Ok(result.meta.regular_market_price)
    }

    // -----------------------------------------------
    // OPTION CHAIN
    // -----------------------------------------------

    /// Fetch the chain for one expiration; `expiration` of None returns
    /// the nearest expiration plus the full expiration-date list.
    pub async fn fetch_option_chain(
        &self,
        symbol: &str,
        expiration: Option<i64>,
    ) -> Result<OptionChainResult> {
        let url = config::option_chain_url(symbol, expiration);
        let text = self.fetch_json(&url).await?;

        let response: OptionChainResponse =
            serde_json::from_str(&text).context("Failed to parse option chain")?;

        response
            .option_chain
            .result
            .into_iter()
            .next()
            .with_context(|| format!("Empty option chain for {}", symbol))
    }

    /// Available expiration epochs for a symbol (first listed = nearest)
    pub async fn fetch_expirations(&self, symbol: &str) -> Result<Vec<i64>> {
        let chain = self.fetch_option_chain(symbol, None).await?;
        Ok(chain.expiration_dates)
    }

    // -----------------------------------------------
    // RISK-FREE RATE PROXY
    // -----------------------------------------------

    /// 10-year treasury yield / 100; falls back to the default on any
    /// failure or non-positive quote.
    pub async fn fetch_risk_free_rate(&self) -> f64 {
        match self.fetch_spot(config::TREASURY_TICKER).await {
            Ok(quote) => {
                let rate = quote / 100.0;
                if rate > 0.0 {
                    rate
                } else {
                    config::DEFAULT_RISK_FREE_RATE
                }
            }
            Err(e) => {
                warn!("Failed to fetch risk-free rate: {e:#}");
                config::DEFAULT_RISK_FREE_RATE
            }
        }
    }
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    // Rotating Accept-Language headers (fingerprint avoidance)
    let lang = config::ACCEPT_LANGUAGES.choose(&mut thread_rng()).unwrap();
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_str(lang)?);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    Ok(Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?)
}
