use crate::models::Alert;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{info, warn};

/// Build the chat message: top-3 summary plus a dashboard link.
pub fn format_dashboard_message(
    total_alerts: usize,
    top_alerts: &[Alert],
    dashboard_url: &str,
) -> String {
    let mut top_3_summary = Vec::new();
    for (i, alert) in top_alerts.iter().take(3).enumerate() {
        let confidence = if alert.score >= 80 {
            "🎯"
        } else if alert.score >= 65 {
            "✅"
        } else {
            "⚠️"
        };
        let sweep_indicator = if alert.sweep { " 🔥 SWEEP" } else { "" };

        top_3_summary.push(format!(
            "{}. {} {} ${} | Score: {} {}{}",
            i + 1,
            alert.ticker,
            alert.side,
            alert.strike,
            alert.score,
            confidence,
            sweep_indicator
        ));
    }

    let updated = top_alerts
        .first()
        .map(|a| a.timestamp.chars().take(16).collect::<String>())
        .unwrap_or_else(|| "Now".to_string());

    format!(
        "\n🚨 **OPTIONS DASHBOARD UPDATE** 🚨\n\n\
         📊 **{} New High-Quality Alerts Found**\n\n\
         **🏆 TOP 3 OPPORTUNITIES:**\n{}\n\n\
         🎯 **View Full Analysis & All Alerts:**\n{}\n\n\
         ⏰ Updated: {}\n",
        total_alerts,
        top_3_summary.join("\n"),
        dashboard_url,
        updated
    )
}

/// Single best-effort POST to the chat webhook. Failure is logged by
/// the caller; there is no retry.
pub async fn send_dashboard_alert(
    client: &Client,
    webhook: &str,
    total_alerts: usize,
    top_alerts: &[Alert],
    dashboard_url: &str,
) -> Result<()> {
    let content = format_dashboard_message(total_alerts, top_alerts, dashboard_url);

    let response = client
        .post(webhook)
        .form(&[("content", content)])
        .send()
        .await
        .context("Webhook POST failed")?;

    if response.status().as_u16() == 204 {
        info!("dashboard alert sent");
    } else {
        warn!(status = %response.status(), "webhook alert not accepted");
    }
    Ok(())
}
