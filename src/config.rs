use std::time::Duration;

// -----------------------------------------------
// MARKET DATA ENDPOINTS (Yahoo Finance)
// -----------------------------------------------
pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const YAHOO_WARMUP_URL: &str = "https://finance.yahoo.com";

pub fn chart_url(symbol: &str) -> String {
    format!(
        "{}/v8/finance/chart/{}?range=1d&interval=1d",
        YAHOO_BASE_URL,
        urlencoding::encode(symbol)
    )
}

pub fn option_chain_url(symbol: &str, expiration: Option<i64>) -> String {
    match expiration {
        Some(epoch) => format!(
            "{}/v7/finance/options/{}?date={}",
            YAHOO_BASE_URL,
            urlencoding::encode(symbol),
            epoch
        ),
        None => format!(
            "{}/v7/finance/options/{}",
            YAHOO_BASE_URL,
            urlencoding::encode(symbol)
        ),
    }
}

// -----------------------------------------------
// SCAN UNIVERSE
// -----------------------------------------------
pub const DEFAULT_TICKERS: &[&str] = &[
    "TSLA", "SPY", "PLTR", "DKS", "RBLX", "AAPL", "NVDA", "AMD", "QQQ", "IWM",
];

/// Ticker for the risk-free-rate proxy (10-year treasury yield index)
pub const TREASURY_TICKER: &str = "^TNX";
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;

// -----------------------------------------------
// SCAN PARAMETERS
// -----------------------------------------------
pub const MAX_EXPIRATIONS_PER_TICKER: usize = 4;
pub const MIN_DAYS_TO_EXPIRATION: i64 = 14;
pub const MAX_DAYS_TO_EXPIRATION: i64 = 60;
pub const MAX_ALERTS: usize = 50;

// Row eligibility thresholds
pub const MIN_VOLUME: u64 = 100;
pub const MIN_OPEN_INTEREST: u64 = 500;
pub const MAX_STRIKE_DISTANCE: f64 = 0.15;
pub const MIN_IV: f64 = 0.1;
pub const MAX_IV: f64 = 3.0;
pub const MIN_LAST_PRICE: f64 = 0.1;

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/131.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-IN,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

// -----------------------------------------------
// SESSION WARMUP
// -----------------------------------------------
pub const WARMUP_DELAY_MS: u64 = 200;

// -----------------------------------------------
// RETRY CONFIG
// -----------------------------------------------
pub const RETRY_BASE_DELAY_MS: u64 = 200;
pub const RETRY_FACTOR: u64 = 3;
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
pub const RETRY_MAX_ATTEMPTS: usize = 5;

// -----------------------------------------------
// OUTPUT FILES
// -----------------------------------------------
pub const DASHBOARD_DATA_FILE: &str = "dashboard_data.json";
pub const SNAPSHOT_FILE: &str = "alerts_backup.json";
pub const HISTORY_FILE: &str = "alert_history.csv";

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Get the execution mode from environment or default to scan
pub fn get_execution_mode() -> String {
    std::env::var("RADAR_MODE").unwrap_or_else(|_| "scan".to_string())
}

/// Get the tickers to scan (comma-separated override via RADAR_TICKERS)
pub fn get_tickers() -> Vec<String> {
    match std::env::var("RADAR_TICKERS") {
        Ok(list) => list
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect(),
        Err(_) => DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Get API server port from environment or default
pub fn get_port() -> u16 {
    std::env::var("RADAR_PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .unwrap_or(5000)
}

/// Get the Discord webhook URL, if configured
pub fn get_discord_webhook() -> Option<String> {
    std::env::var("DISCORD_WEBHOOK").ok().filter(|s| !s.is_empty())
}

/// Get the dashboard base URL shown in notifications
pub fn get_dashboard_url() -> String {
    std::env::var("DASHBOARD_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Get the alert-store API endpoint the pipeline POSTs to, if configured
pub fn get_store_api_url() -> Option<String> {
    std::env::var("RADAR_API_URL").ok().filter(|s| !s.is_empty())
}

/// Get the local repository path used for dashboard deployment
pub fn get_publish_repo() -> Option<String> {
    std::env::var("RADAR_PUBLISH_REPO").ok().filter(|s| !s.is_empty())
}

/// Get the branch the publisher pushes to
pub fn get_publish_branch() -> String {
    std::env::var("RADAR_PUBLISH_BRANCH").unwrap_or_else(|_| "master".to_string())
}
