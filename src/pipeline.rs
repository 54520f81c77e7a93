use crate::commentary::generate_commentary;
use crate::config;
use crate::history;
use crate::market_client::MarketClient;
use crate::models::Alert;
use crate::notifier;
use crate::publisher::Publisher;
use crate::scanner::scan_all;
use anyhow::{Context, Result};
use chrono::Local;
use reqwest::Client;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Where a finished scan gets delivered: the dashboard data file or the
/// alert-store HTTP API. Both receive the same capped, scored,
/// commentary-enriched list.
pub enum Sink {
    File(PathBuf),
    Http(String),
}

impl Sink {
    pub async fn deliver(&self, http: &Client, top_alerts: &[Alert], total: usize) -> Result<()> {
        match self {
            Sink::File(path) => {
                let payload = json!({
                    "alerts": top_alerts,
                    "last_updated": Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
                    "total": total,
                });
                std::fs::write(path, serde_json::to_string_pretty(&payload)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), count = top_alerts.len(), "wrote dashboard data");
            }
            Sink::Http(url) => {
                let response = http
                    .post(url)
                    .json(&json!({ "alerts": top_alerts }))
                    .send()
                    .await
                    .with_context(|| format!("POST {} failed", url))?;
                if !response.status().is_success() {
                    anyhow::bail!("Alert store rejected update: {}", response.status());
                }
                info!(url = %url, count = top_alerts.len(), "pushed alerts to store");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub total_found: usize,
    pub published: usize,
}

/// One scan-and-deliver cycle. Scanning is strictly sequential per
/// ticker; each delivery step catches and logs its own failure so one
/// broken collaborator never blocks the rest.
pub struct Pipeline {
    market: MarketClient,
    http: Client,
    tickers: Vec<String>,
    sinks: Vec<Sink>,
    webhook: Option<String>,
    dashboard_url: String,
    history_path: PathBuf,
    publisher: Option<Publisher>,
    max_alerts: usize,
}

impl Pipeline {
    pub fn from_env() -> Result<Self> {
        let mut sinks = vec![Sink::File(PathBuf::from(config::DASHBOARD_DATA_FILE))];
        if let Some(url) = config::get_store_api_url() {
            sinks.push(Sink::Http(url));
        }

        let publisher = config::get_publish_repo()
            .map(|repo| Publisher::new(repo, config::get_publish_branch()));

        Ok(Self {
            market: MarketClient::new()?,
            http: Client::new(),
            tickers: config::get_tickers(),
            sinks,
            webhook: config::get_discord_webhook(),
            dashboard_url: config::get_dashboard_url(),
            history_path: PathBuf::from(config::HISTORY_FILE),
            publisher,
            max_alerts: config::MAX_ALERTS,
        })
    }

    /// Construct a pipeline with explicit collaborators (used by tests
    /// and the scheduler).
    pub fn new(
        market: MarketClient,
        tickers: Vec<String>,
        sinks: Vec<Sink>,
        webhook: Option<String>,
        dashboard_url: String,
        history_path: PathBuf,
        publisher: Option<Publisher>,
        max_alerts: usize,
    ) -> Self {
        Self {
            market,
            http: Client::new(),
            tickers,
            sinks,
            webhook,
            dashboard_url,
            history_path,
            publisher,
            max_alerts,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        info!(tickers = self.tickers.len(), "starting options scan");
        let all_alerts = scan_all(&self.market, &self.tickers).await;
        self.run_with_alerts(all_alerts).await
    }

    /// Sort, cap, enrich and deliver an already-scanned alert list.
    /// With zero alerts every downstream step is skipped: no file is
    /// written or modified.
    pub async fn run_with_alerts(&self, mut all_alerts: Vec<Alert>) -> Result<RunSummary> {
        all_alerts.sort_by(|a, b| b.score.cmp(&a.score));

        let total_found = all_alerts.len();
        all_alerts.truncate(self.max_alerts);

        let mut top_alerts = all_alerts;
        for alert in &mut top_alerts {
            alert.commentary = generate_commentary(alert);
        }

        if top_alerts.is_empty() {
            info!("no alerts found matching criteria");
            return Ok(RunSummary::default());
        }

        info!(total_found, selected = top_alerts.len(), "delivering alerts");

        for sink in &self.sinks {
            if let Err(e) = sink.deliver(&self.http, &top_alerts, total_found).await {
                error!("sink delivery failed: {e:#}");
            }
        }

        if let Some(webhook) = &self.webhook {
            if let Err(e) = notifier::send_dashboard_alert(
                &self.http,
                webhook,
                total_found,
                &top_alerts,
                &self.dashboard_url,
            )
            .await
            {
                error!("webhook notification failed: {e:#}");
            }
        }

        if let Err(e) = history::log_alerts(&self.history_path, &top_alerts) {
            error!("history logging failed: {e:#}");
        }

        if let Some(publisher) = &self.publisher {
            if let Err(e) = publisher.publish(&[Path::new(config::DASHBOARD_DATA_FILE)]) {
                error!("publish failed: {e:#}");
            }
        }

        Ok(RunSummary {
            total_found,
            published: top_alerts.len(),
        })
    }
}
