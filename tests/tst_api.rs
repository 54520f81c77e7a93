use options_radar::api_server::build_router;
use options_radar::{Alert, AlertStore, OptionSide};
use serde_json::json;

fn alert(ticker: &str, side: OptionSide, score: i32, sweep: bool) -> Alert {
    Alert {
        ticker: ticker.to_string(),
        side,
        strike: 100.0,
        current_price: 102.0,
        expiration: "2026-09-28".to_string(),
        days_to_expiration: 30,
        volume: 1500,
        open_interest: 400,
        last_price: 2.5,
        implied_volatility: 0.55,
        timestamp: "2026-08-29T10:00:00".to_string(),
        delta: None,
        gamma: None,
        theta: None,
        vega: None,
        score,
        sweep,
        commentary: String::new(),
    }
}

async fn spawn_server(store: AlertStore) -> String {
    let app = build_router(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_alerts_round_trip_over_http() {
    let snapshot = std::env::temp_dir().join(format!("radar_api_{}.json", std::process::id()));
    let _ = std::fs::remove_file(&snapshot);

    let base = spawn_server(AlertStore::new(&snapshot)).await;
    let client = reqwest::Client::new();

    // Bulk replace
    let payload = json!({
        "alerts": [
            alert("TSLA", OptionSide::Call, 98, true),
            alert("SPY", OptionSide::Put, 60, false),
            alert("NVDA", OptionSide::Call, 75, false),
        ]
    });
    let res = client
        .post(format!("{}/api/alerts", base))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 3);
    assert!(snapshot.exists());

    // Filtered read, sorted by score descending
    let body: serde_json::Value = client
        .get(format!("{}/api/alerts?min_score=70", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(body["alerts"][0]["ticker"], "TSLA");
    assert_eq!(body["alerts"][1]["ticker"], "NVDA");
    assert!(body["last_updated"].is_string());

    // Side filter
    let body: serde_json::Value = client
        .get(format!("{}/api/alerts?type=PUT", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["alerts"][0]["type"], "PUT");

    // Stats
    let body: serde_json::Value = client
        .get(format!("{}/api/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total_alerts"], 3);
    assert_eq!(body["call_alerts"], 2);
    assert_eq!(body["put_alerts"], 1);
    assert_eq!(body["sweep_alerts"], 1);

    std::fs::remove_file(&snapshot).unwrap();
}

#[tokio::test]
async fn test_empty_store_reads() {
    let snapshot = std::env::temp_dir().join(format!("radar_api_empty_{}.json", std::process::id()));
    let _ = std::fs::remove_file(&snapshot);

    let base = spawn_server(AlertStore::new(&snapshot)).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("{}/api/alerts", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["total"], 0);
    assert_eq!(body["alerts"].as_array().unwrap().len(), 0);
}
