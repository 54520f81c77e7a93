use crate::models::Alert;

/// Human-readable commentary for one alert, built from fixed threshold
/// tables and joined with " | ". Purely presentational.
pub fn generate_commentary(alert: &Alert) -> String {
    let mut parts: Vec<String> = Vec::new();

    // Confidence tier
    let (emoji, confidence) = if alert.score >= 80 {
        ("🎯", "HIGH CONFIDENCE")
    } else if alert.score >= 65 {
        ("✅", "GOOD SETUP")
    } else if alert.score >= 50 {
        ("⚠️", "MODERATE")
    } else {
        ("❌", "LOW CONFIDENCE")
    };
    parts.push(format!("{} {}", emoji, confidence));

    // Volume analysis
    let vol_ratio = alert.volume as f64 / alert.open_interest.max(1) as f64;
    if vol_ratio > 3.0 {
        parts.push("MASSIVE volume surge - potential big move".to_string());
    } else if vol_ratio > 2.0 {
        parts.push("Strong volume activity above normal".to_string());
    } else if vol_ratio > 1.5 {
        parts.push("Elevated volume interest".to_string());
    }

    // IV analysis
    let iv = alert.implied_volatility;
    if iv > 1.0 {
        parts.push("Extreme IV - high risk/reward".to_string());
    } else if iv > 0.6 {
        parts.push("Elevated IV suggests catalyst".to_string());
    } else if (0.3..=0.6).contains(&iv) {
        parts.push("Balanced IV environment".to_string());
    }

    // Time analysis
    let days = alert.days_to_expiration;
    if days >= 30 {
        parts.push("Good time buffer for thesis".to_string());
    } else if days >= 21 {
        parts.push("Moderate time decay risk".to_string());
    } else {
        parts.push("Short-term play - watch theta".to_string());
    }

    // Greeks insight
    if let Some(delta) = alert.delta {
        let delta_abs = delta.abs();
        if delta_abs > 0.6 {
            parts.push("High delta sensitivity".to_string());
        } else if delta_abs > 0.4 {
            parts.push("Good price sensitivity".to_string());
        }
    }

    parts.join(" | ")
}
