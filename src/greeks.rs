use crate::models::{Greeks, OptionSide};
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

/// Standard normal cumulative distribution function
fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Standard normal probability density function
fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

/// Analytical Black-Scholes Greeks for one contract.
///
/// Conventions: theta is per calendar day (annual theta / 365), vega is
/// per volatility point (/ 100). Returns None when time-to-expiry or
/// implied volatility is non-positive, or the computation does not
/// produce finite values.
pub fn calculate_greeks(
    spot: f64,
    strike: f64,
    t_years: f64,
    rate: f64,
    iv: f64,
    side: OptionSide,
) -> Option<Greeks> {
    if t_years <= 0.0 || iv <= 0.0 || spot <= 0.0 || strike <= 0.0 {
        return None;
    }

    let sqrt_t = t_years.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * iv * iv) * t_years) / (iv * sqrt_t);
    let d2 = d1 - iv * sqrt_t;
    let discount = (-rate * t_years).exp();

    let delta = match side {
        OptionSide::Call => norm_cdf(d1),
        OptionSide::Put => norm_cdf(d1) - 1.0,
    };

    let gamma = norm_pdf(d1) / (spot * iv * sqrt_t);

    let theta_annual = match side {
        OptionSide::Call => {
            -spot * norm_pdf(d1) * iv / (2.0 * sqrt_t) - rate * strike * discount * norm_cdf(d2)
        }
        OptionSide::Put => {
            -spot * norm_pdf(d1) * iv / (2.0 * sqrt_t) + rate * strike * discount * norm_cdf(-d2)
        }
    };
    let theta = theta_annual / 365.0;

    let vega = spot * norm_pdf(d1) * sqrt_t / 100.0;

    let greeks = Greeks {
        delta,
        gamma,
        theta,
        vega,
    };

    if [greeks.delta, greeks.gamma, greeks.theta, greeks.vega]
        .iter()
        .all(|v| v.is_finite())
    {
        Some(greeks)
    } else {
        None
    }
}
