pub mod api_server;
pub mod commentary;
pub mod config;
pub mod greeks;
pub mod history;
pub mod logging;
pub mod market_client;
pub mod models;
pub mod notifier;
pub mod pipeline;
pub mod publisher;
pub mod scanner;
pub mod scheduler;
pub mod scoring;
pub mod store;

// Re-exports (public API)
pub use market_client::MarketClient;
pub use models::{Alert, ChainRow, Greeks, OptionSide};
pub use pipeline::{Pipeline, RunSummary, Sink};
pub use scoring::{is_sweep, score_alert};
pub use store::{AlertFilter, AlertStore, Snapshot};
