use crate::models::Alert;
use crate::store::{AlertFilter, AlertStore, StoreStats};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

// -----------------------------------------------
// API REQUEST/RESPONSE MODELS
// -----------------------------------------------

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    pub total: usize,
    pub last_updated: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceAlertsRequest {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Serialize)]
pub struct ReplaceAlertsResponse {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

#[derive(Clone)]
pub struct AppState {
    store: AlertStore,
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// GET /api/alerts?ticker=&type=&min_score=&min_expiration=&max_expiration=
async fn get_alerts(
    Query(filter): Query<AlertFilter>,
    State(state): State<AppState>,
) -> Json<AlertsResponse> {
    let (alerts, last_updated) = state.store.query(&filter).await;
    let total = alerts.len();

    Json(AlertsResponse {
        alerts,
        total,
        last_updated,
    })
}

/// POST /api/alerts - replace the entire collection
async fn replace_alerts(
    State(state): State<AppState>,
    Json(body): Json<ReplaceAlertsRequest>,
) -> Result<Json<ReplaceAlertsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.replace_all(body.alerts).await {
        Ok(count) => Ok(Json(ReplaceAlertsResponse {
            status: "success".to_string(),
            count,
        })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// GET /api/stats - dashboard aggregates
async fn get_stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.store.stats().await)
}

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

pub fn build_router(store: AlertStore) -> Router {
    Router::new()
        .route("/api/alerts", get(get_alerts).post(replace_alerts))
        .route("/api/stats", get(get_stats))
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

pub async fn start_server(store: AlertStore, port: u16) -> Result<()> {
    // Restore the previous collection so a restart is not empty
    let restored = store.load().await.unwrap_or(0);
    if restored > 0 {
        info!(restored, "loaded alerts from snapshot file");
    }

    let app = build_router(store);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("🚀 Alert API server running on http://{}", addr);
    println!("📋 Available endpoints:");
    println!("   GET  /api/alerts?ticker=&type=&min_score=&min_expiration=&max_expiration=");
    println!("   POST /api/alerts");
    println!("   GET  /api/stats");
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}
