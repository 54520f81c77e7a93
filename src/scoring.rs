use crate::models::{Alert, Greeks, OptionSide};

/// Maximum score; the sum is capped here but has no explicit floor, so a
/// contract carrying only the short-expiry penalty can go negative.
pub const MAX_SCORE: i32 = 100;

/// Signed moneyness, side-aware: positive means in-the-money.
pub fn moneyness(side: OptionSide, current_price: f64, strike: f64) -> f64 {
    match side {
        OptionSide::Call => (current_price - strike) / current_price,
        OptionSide::Put => (strike - current_price) / current_price,
    }
}

/// Additive desirability score for one contract.
///
/// Buckets: volume/OI ratio, implied volatility band, moneyness band,
/// days-to-expiration band, and a small Greeks bonus when a snapshot is
/// available. Each bucket contributes at most one of its tiers.
pub fn score_alert(alert: &Alert, greeks: Option<&Greeks>) -> i32 {
    let mut score = 0;

    // Volume momentum
    let volume_ratio = alert.volume as f64 / alert.open_interest.max(1) as f64;
    if volume_ratio > 3.0 {
        score += 30;
    } else if volume_ratio > 2.0 {
        score += 20;
    } else if volume_ratio > 1.0 {
        score += 10;
    }

    // Implied volatility band
    let iv = alert.implied_volatility;
    if (0.3..=0.8).contains(&iv) {
        score += 25;
    } else if iv > 0.8 && iv <= 1.2 {
        score += 15;
    } else if iv > 1.2 {
        score += 5;
    }

    // Moneyness band
    let m = moneyness(alert.side, alert.current_price, alert.strike);
    if (-0.05..=0.05).contains(&m) {
        score += 20;
    } else if (-0.1..=0.1).contains(&m) {
        score += 15;
    } else if m > 0.0 {
        score += 10;
    }

    // Time decay band
    let days = alert.days_to_expiration;
    if (21..=45).contains(&days) {
        score += 15;
    } else if (14..=60).contains(&days) {
        score += 10;
    } else if days < 14 {
        score -= 10;
    }

    // Greeks bonus
    if let Some(g) = greeks {
        let good_delta = match alert.side {
            OptionSide::Call => (0.3..=0.7).contains(&g.delta),
            OptionSide::Put => (-0.7..=-0.3).contains(&g.delta),
        };
        if good_delta {
            score += 5;
        }
        if g.theta > -1.0 {
            score += 3;
        }
    }

    score.min(MAX_SCORE)
}

/// Sweep heuristic: volume more than 3x open interest, with open
/// interest actually present.
pub fn is_sweep(volume: u64, open_interest: u64) -> bool {
    open_interest > 0 && volume > 3 * open_interest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_alert() -> Alert {
        Alert {
            ticker: "TSLA".to_string(),
            side: OptionSide::Call,
            strike: 100.0,
            current_price: 100.0,
            expiration: "2026-09-28".to_string(),
            days_to_expiration: 30,
            volume: 2000,
            open_interest: 500,
            last_price: 3.5,
            implied_volatility: 0.5,
            timestamp: "2026-08-29T10:00:00".to_string(),
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            score: 0,
            sweep: false,
            commentary: String::new(),
        }
    }

    #[test]
    fn test_reference_score_98() {
        // vol/OI = 4, IV 0.5, ATM, 30 days, delta 0.5, theta -0.5:
        // 30 + 25 + 20 + 15 + 5 + 3 = 98
        let alert = base_alert();
        let greeks = Greeks {
            delta: 0.5,
            gamma: 0.02,
            theta: -0.5,
            vega: 0.4,
        };
        assert_eq!(score_alert(&alert, Some(&greeks)), 98);
    }

    #[test]
    fn test_score_without_greeks() {
        // Same contract minus the Greeks bonus: 30 + 25 + 20 + 15 = 90
        let alert = base_alert();
        assert_eq!(score_alert(&alert, None), 90);
    }

    #[test]
    fn test_very_high_iv_bucket() {
        // IV 1.5 passes the chain filter (< 3.0) and lands in the
        // riskiest band at +5 instead of +25
        let mut alert = base_alert();
        alert.implied_volatility = 1.5;
        assert_eq!(score_alert(&alert, None), 30 + 5 + 20 + 15);
    }

    #[test]
    fn test_short_expiry_penalty_is_exclusive() {
        // Under 14 days contributes only the -10 penalty
        let mut alert = base_alert();
        alert.days_to_expiration = 10;
        alert.volume = 0;
        alert.implied_volatility = 0.0;
        alert.strike = 200.0; // deep OTM call, no moneyness points
        assert_eq!(score_alert(&alert, None), -10);
    }

    #[test]
    fn test_day_buckets_are_mutually_exclusive() {
        let mut alert = base_alert();

        alert.days_to_expiration = 30; // sweet spot
        let sweet = score_alert(&alert, None);

        alert.days_to_expiration = 50; // acceptable range only
        let acceptable = score_alert(&alert, None);

        assert_eq!(sweet - acceptable, 5); // +15 vs +10, never both
    }

    #[test]
    fn test_put_moneyness_and_delta() {
        let mut alert = base_alert();
        alert.side = OptionSide::Put;
        alert.strike = 108.0; // ITM put, moneyness 0.08 -> +15
        let greeks = Greeks {
            delta: -0.6,
            gamma: 0.02,
            theta: -0.4,
            vega: 0.4,
        };
        // 30 + 25 + 15 + 15 + 5 + 3 = 93
        assert_eq!(score_alert(&alert, Some(&greeks)), 93);
    }

    #[test]
    fn test_score_capped_at_100() {
        let mut alert = base_alert();
        alert.volume = 10_000; // ratio 20
        let greeks = Greeks {
            delta: 0.5,
            gamma: 0.02,
            theta: -0.1,
            vega: 0.4,
        };
        assert!(score_alert(&alert, Some(&greeks)) <= MAX_SCORE);
    }

    #[test]
    fn test_sweep_requires_open_interest() {
        assert!(!is_sweep(1000, 0));
        assert!(is_sweep(1501, 500));
        assert!(!is_sweep(1500, 500)); // strictly greater than 3x
    }

    #[test]
    fn test_moneyness_sign_by_side() {
        // Call below strike is OTM (negative), put above strike is ITM
        assert!(moneyness(OptionSide::Call, 100.0, 110.0) < 0.0);
        assert!(moneyness(OptionSide::Put, 100.0, 110.0) > 0.0);
        assert_eq!(moneyness(OptionSide::Call, 100.0, 100.0), 0.0);
    }
}
