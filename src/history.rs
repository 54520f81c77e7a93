use crate::models::Alert;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::path::Path;

/// Append one row per alert to the flat history log. The file is opened
/// and closed per call; rows are never deduplicated.
pub fn log_alerts(path: &Path, alerts: &[Alert]) -> Result<usize> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    let now = Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string();

    for alert in alerts {
        writer.write_record(&[
            now.clone(),
            alert.ticker.clone(),
            alert.side.as_str().to_string(),
            alert.strike.to_string(),
            alert.expiration.clone(),
            alert.volume.to_string(),
            alert.open_interest.to_string(),
            alert.last_price.to_string(),
            format!("{:.2}", alert.implied_volatility * 100.0),
            alert.score.to_string(),
        ])?;
    }

    writer.flush().context("Failed to flush history log")?;
    Ok(alerts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionSide;

    fn alert() -> Alert {
        Alert {
            ticker: "TSLA".to_string(),
            side: OptionSide::Put,
            strike: 420.0,
            current_price: 430.0,
            expiration: "2026-09-28".to_string(),
            days_to_expiration: 30,
            volume: 1200,
            open_interest: 600,
            last_price: 5.25,
            implied_volatility: 0.6512,
            timestamp: "2026-08-29T10:00:00".to_string(),
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            score: 75,
            sweep: false,
            commentary: String::new(),
        }
    }

    #[test]
    fn test_appends_rows_with_iv_as_percentage() {
        let path = std::env::temp_dir().join(format!("radar_history_{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);

        log_alerts(&path, &[alert()]).unwrap();
        log_alerts(&path, &[alert()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("TSLA,PUT,420,2026-09-28,1200,600,5.25,65.12,75"));

        std::fs::remove_file(&path).unwrap();
    }
}
