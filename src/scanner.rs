use crate::config;
use crate::greeks::calculate_greeks;
use crate::market_client::MarketClient;
use crate::models::{Alert, ChainRow, OptionSide};
use crate::scoring::{is_sweep, score_alert};
use anyhow::Result;
use chrono::{DateTime, Local};
use tracing::{debug, error, info};

/// Coarse eligibility filter applied before any pricing work. Rows
/// failing any clause are dropped silently.
pub fn row_is_eligible(row: &ChainRow, current_price: f64) -> bool {
    let volume = row.volume_or_zero();
    let oi = row.open_interest_or_zero();
    let iv = row.iv_or_zero();
    let last_price = row.last_price_or_zero();

    volume >= config::MIN_VOLUME
        && oi >= config::MIN_OPEN_INTEREST
        && (row.strike - current_price).abs() / current_price <= config::MAX_STRIKE_DISTANCE
        && iv > config::MIN_IV
        && iv < config::MAX_IV
        && last_price > config::MIN_LAST_PRICE
}

/// Assemble one scored alert from an eligible chain row.
pub fn build_alert(
    ticker: &str,
    side: OptionSide,
    row: &ChainRow,
    current_price: f64,
    expiration: &str,
    days_to_expiration: i64,
    risk_free_rate: f64,
    timestamp: &str,
) -> Alert {
    let iv = row.iv_or_zero();
    let time_to_expiry = days_to_expiration as f64 / 365.0;

    let greeks = calculate_greeks(
        current_price,
        row.strike,
        time_to_expiry,
        risk_free_rate,
        iv,
        side,
    );

    let volume = row.volume_or_zero();
    let open_interest = row.open_interest_or_zero();

    let mut alert = Alert {
        ticker: ticker.to_string(),
        side,
        strike: row.strike,
        current_price,
        expiration: expiration.to_string(),
        days_to_expiration,
        volume,
        open_interest,
        last_price: row.last_price_or_zero(),
        implied_volatility: iv,
        timestamp: timestamp.to_string(),
        delta: greeks.map(|g| g.delta),
        gamma: greeks.map(|g| g.gamma),
        theta: greeks.map(|g| g.theta),
        vega: greeks.map(|g| g.vega),
        score: 0,
        sweep: is_sweep(volume, open_interest),
        commentary: String::new(),
    };

    alert.score = score_alert(&alert, greeks.as_ref());
    alert
}

/// Score all eligible rows of one side of a chain.
pub fn scan_rows(
    ticker: &str,
    side: OptionSide,
    rows: &[ChainRow],
    current_price: f64,
    expiration: &str,
    days_to_expiration: i64,
    risk_free_rate: f64,
    timestamp: &str,
) -> Vec<Alert> {
    rows.iter()
        .filter(|row| row_is_eligible(row, current_price))
        .map(|row| {
            build_alert(
                ticker,
                side,
                row,
                current_price,
                expiration,
                days_to_expiration,
                risk_free_rate,
                timestamp,
            )
        })
        .collect()
}

/// Whole days remaining until an expiration epoch. Floor division, so a
/// partial day does not count and past expirations go negative.
pub fn days_until(expiration_epoch: i64, now: DateTime<Local>) -> i64 {
    (expiration_epoch - now.timestamp()).div_euclid(86_400)
}

/// Scan one ticker: spot price, first few expirations, both sides of
/// each chain inside the configured expiration window.
pub async fn scan_ticker(
    client: &MarketClient,
    ticker: &str,
    risk_free_rate: f64,
) -> Result<Vec<Alert>> {
    let current_price = client.fetch_spot(ticker).await?;
    let expirations = client.fetch_expirations(ticker).await?;

    let now = Local::now();
    let timestamp = now.format("%Y-%m-%dT%H:%M:%S").to_string();
    let mut alerts = Vec::new();

    for &epoch in expirations.iter().take(config::MAX_EXPIRATIONS_PER_TICKER) {
        let days = days_until(epoch, now);
        if days < config::MIN_DAYS_TO_EXPIRATION || days > config::MAX_DAYS_TO_EXPIRATION {
            continue;
        }

        let expiration = DateTime::from_timestamp(epoch, 0)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        let chain = client.fetch_option_chain(ticker, Some(epoch)).await?;

        for quotes in &chain.options {
            alerts.extend(scan_rows(
                ticker,
                OptionSide::Call,
                &quotes.calls,
                current_price,
                &expiration,
                days,
                risk_free_rate,
                &timestamp,
            ));
            alerts.extend(scan_rows(
                ticker,
                OptionSide::Put,
                &quotes.puts,
                current_price,
                &expiration,
                days,
                risk_free_rate,
                &timestamp,
            ));
        }

        debug!(ticker, expiration = %expiration, days, "scanned expiration");
    }

    Ok(alerts)
}

/// Scan tickers strictly sequentially. A ticker that fails contributes
/// zero alerts; the run continues with the rest.
pub async fn scan_all(client: &MarketClient, tickers: &[String]) -> Vec<Alert> {
    let risk_free_rate = client.fetch_risk_free_rate().await;
    let mut all_alerts = Vec::new();

    for ticker in tickers {
        match scan_ticker(client, ticker, risk_free_rate).await {
            Ok(alerts) => {
                info!(ticker = %ticker, count = alerts.len(), "scan finished");
                all_alerts.extend(alerts);
            }
            Err(e) => {
                error!(ticker = %ticker, "scan failed: {e:#}");
            }
        }
    }

    all_alerts
}
