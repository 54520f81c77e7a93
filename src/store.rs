use crate::models::{Alert, OptionSide};
use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// One immutable generation of the alert collection. Writers build a
/// fresh snapshot and swap it in; readers keep whatever Arc they hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub alerts: Vec<Alert>,
    pub last_updated: String,
    #[serde(default)]
    pub version: u64,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            alerts: Vec::new(),
            last_updated: now_iso(),
            version: 0,
        }
    }
}

/// Query parameters for filtered reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilter {
    pub ticker: Option<String>,
    #[serde(rename = "type")]
    pub side: Option<String>,
    pub min_score: Option<i32>,
    pub min_expiration: Option<i64>,
    pub max_expiration: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total_alerts: usize,
    pub call_alerts: usize,
    pub put_alerts: usize,
    pub sweep_alerts: usize,
    pub last_updated: String,
}

/// Process-wide alert collection with copy-on-write snapshot replace
/// and a flat-file mirror for crash recovery.
#[derive(Clone)]
pub struct AlertStore {
    current: Arc<RwLock<Arc<Snapshot>>>,
    snapshot_path: PathBuf,
}

impl AlertStore {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(Snapshot::empty()))),
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Restore the collection from the snapshot file, if one exists.
    pub async fn load(&self) -> Result<usize> {
        if !self.snapshot_path.exists() {
            return Ok(0);
        }

        let text = std::fs::read_to_string(&self.snapshot_path)
            .with_context(|| format!("Failed to read {}", self.snapshot_path.display()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&text).context("Failed to parse alert snapshot")?;

        let count = snapshot.alerts.len();
        *self.current.write().await = Arc::new(snapshot);
        info!(count, "restored alerts from snapshot");
        Ok(count)
    }

    /// Replace the entire collection atomically and mirror the new
    /// snapshot to disk.
    pub async fn replace_all(&self, alerts: Vec<Alert>) -> Result<usize> {
        let count = alerts.len();

        let next = {
            let guard = self.current.read().await;
            Arc::new(Snapshot {
                alerts,
                last_updated: now_iso(),
                version: guard.version + 1,
            })
        };

        std::fs::write(&self.snapshot_path, serde_json::to_string_pretty(&*next)?)
            .with_context(|| format!("Failed to write {}", self.snapshot_path.display()))?;

        *self.current.write().await = next;
        Ok(count)
    }

    /// Current snapshot (cheap Arc clone).
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Filtered read, sorted by score descending. Ordering among equal
    /// scores is not guaranteed.
    pub async fn query(&self, filter: &AlertFilter) -> (Vec<Alert>, String) {
        let snapshot = self.snapshot().await;
        let alerts = apply_filter(&snapshot.alerts, filter);
        (alerts, snapshot.last_updated.clone())
    }

    pub async fn stats(&self) -> StoreStats {
        let snapshot = self.snapshot().await;
        StoreStats {
            total_alerts: snapshot.alerts.len(),
            call_alerts: snapshot
                .alerts
                .iter()
                .filter(|a| a.side == OptionSide::Call)
                .count(),
            put_alerts: snapshot
                .alerts
                .iter()
                .filter(|a| a.side == OptionSide::Put)
                .count(),
            sweep_alerts: snapshot.alerts.iter().filter(|a| a.sweep).count(),
            last_updated: snapshot.last_updated.clone(),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

/// Apply query filters and sort by score descending.
pub fn apply_filter(alerts: &[Alert], filter: &AlertFilter) -> Vec<Alert> {
    let ticker = filter
        .ticker
        .as_deref()
        .map(str::to_uppercase)
        .filter(|t| !t.is_empty());
    let side = filter
        .side
        .as_deref()
        .map(str::to_uppercase)
        .filter(|s| s != "ALL" && !s.is_empty());
    let min_score = filter.min_score.unwrap_or(0);
    let min_expiration = filter.min_expiration.unwrap_or(0);
    let max_expiration = filter.max_expiration.unwrap_or(365);

    let mut filtered: Vec<Alert> = alerts
        .iter()
        .filter(|a| {
            ticker
                .as_deref()
                .map(|t| a.ticker.contains(t))
                .unwrap_or(true)
        })
        .filter(|a| side.as_deref().map(|s| a.side.as_str() == s).unwrap_or(true))
        .filter(|a| min_score <= 0 || a.score >= min_score)
        .filter(|a| {
            a.days_to_expiration >= min_expiration && a.days_to_expiration <= max_expiration
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.score.cmp(&a.score));
    filtered
}

fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
