use serde::{Deserialize, Serialize};

// -----------------------------------------------
// DOMAIN TYPES
// -----------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionSide {
    #[serde(rename = "CALL")]
    Call,
    #[serde(rename = "PUT")]
    Put,
}

impl OptionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "CALL",
            OptionSide::Put => "PUT",
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Black-Scholes sensitivities for one contract
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
}

/// One scored contract, immutable once built. Field names on the wire
/// match the dashboard's JSON shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub ticker: String,

    #[serde(rename = "type")]
    pub side: OptionSide,

    pub strike: f64,

    #[serde(rename = "currentPrice")]
    pub current_price: f64,

    /// Expiration date as an ISO date string ("2026-01-16")
    pub expiration: String,

    #[serde(rename = "daysToExpiration")]
    pub days_to_expiration: i64,

    pub volume: u64,

    #[serde(rename = "openInterest")]
    pub open_interest: u64,

    #[serde(rename = "lastPrice")]
    pub last_price: f64,

    /// Fraction, not percentage (0.5 = 50%)
    #[serde(rename = "impliedVolatility")]
    pub implied_volatility: f64,

    pub timestamp: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vega: Option<f64>,

    pub score: i32,
    pub sweep: bool,

    #[serde(default)]
    pub commentary: String,
}

impl Alert {
    pub fn greeks(&self) -> Option<Greeks> {
        match (self.delta, self.gamma, self.theta, self.vega) {
            (Some(delta), Some(gamma), Some(theta), Some(vega)) => Some(Greeks {
                delta,
                gamma,
                theta,
                vega,
            }),
            _ => None,
        }
    }
}

// -----------------------------------------------
// MARKET DATA WIRE TYPES (Yahoo Finance)
// -----------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub result: Vec<ChartResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainResponse {
    #[serde(rename = "optionChain")]
    pub option_chain: OptionChainEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainEnvelope {
    pub result: Vec<OptionChainResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainResult {
    #[serde(rename = "underlyingSymbol")]
    pub underlying_symbol: String,

    /// Unix epochs of all available expirations
    #[serde(rename = "expirationDates", default)]
    pub expiration_dates: Vec<i64>,

    /// Chains for the requested expiration (one entry per request)
    #[serde(default)]
    pub options: Vec<OptionQuotes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionQuotes {
    #[serde(rename = "expirationDate")]
    pub expiration_date: i64,

    #[serde(default)]
    pub calls: Vec<ChainRow>,

    #[serde(default)]
    pub puts: Vec<ChainRow>,
}

/// One raw row from the chain. Volume/OI/IV are frequently absent for
/// illiquid strikes; absent means zero for filtering purposes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainRow {
    pub strike: f64,

    #[serde(rename = "lastPrice", default)]
    pub last_price: Option<f64>,

    #[serde(default)]
    pub volume: Option<u64>,

    #[serde(rename = "openInterest", default)]
    pub open_interest: Option<u64>,

    #[serde(rename = "impliedVolatility", default)]
    pub implied_volatility: Option<f64>,
}

impl ChainRow {
    pub fn volume_or_zero(&self) -> u64 {
        self.volume.unwrap_or(0)
    }

    pub fn open_interest_or_zero(&self) -> u64 {
        self.open_interest.unwrap_or(0)
    }

    pub fn last_price_or_zero(&self) -> f64 {
        self.last_price.unwrap_or(0.0)
    }

    pub fn iv_or_zero(&self) -> f64 {
        self.implied_volatility.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_serializes_wire_names() {
        let alert = Alert {
            ticker: "SPY".to_string(),
            side: OptionSide::Call,
            strike: 450.0,
            current_price: 452.3,
            expiration: "2026-01-16".to_string(),
            days_to_expiration: 30,
            volume: 2000,
            open_interest: 500,
            last_price: 3.2,
            implied_volatility: 0.5,
            timestamp: "2026-08-29T10:00:00".to_string(),
            delta: Some(0.5),
            gamma: Some(0.02),
            theta: Some(-0.5),
            vega: Some(0.4),
            score: 98,
            sweep: true,
            commentary: String::new(),
        };

        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "CALL");
        assert_eq!(json["currentPrice"], 452.3);
        assert_eq!(json["daysToExpiration"], 30);
        assert_eq!(json["openInterest"], 500);
        assert_eq!(json["impliedVolatility"], 0.5);
    }

    #[test]
    fn test_missing_greeks_omitted() {
        let alert = Alert {
            ticker: "SPY".to_string(),
            side: OptionSide::Put,
            strike: 450.0,
            current_price: 452.3,
            expiration: "2026-01-16".to_string(),
            days_to_expiration: 30,
            volume: 100,
            open_interest: 0,
            last_price: 3.2,
            implied_volatility: 0.5,
            timestamp: "2026-08-29T10:00:00".to_string(),
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            score: 10,
            sweep: false,
            commentary: String::new(),
        };

        let json = serde_json::to_value(&alert).unwrap();
        assert!(json.get("delta").is_none());
        assert!(alert.greeks().is_none());
    }

    #[test]
    fn test_chain_row_defaults() {
        let row: ChainRow = serde_json::from_str(r#"{"strike": 100.0}"#).unwrap();
        assert_eq!(row.volume_or_zero(), 0);
        assert_eq!(row.open_interest_or_zero(), 0);
        assert_eq!(row.last_price_or_zero(), 0.0);
        assert_eq!(row.iv_or_zero(), 0.0);
    }
}
