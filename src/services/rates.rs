//! Risk-free rate and dividend yield provider
//!
//! Live values come from the configured rates endpoint; anything
//! unavailable or implausible is replaced by the institutional fallback
//! constants so the core always sees fully-populated carry params.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::analytics::next_quarterly_expiration;
use crate::constants::{
    FALLBACK_NDX_DIV_YIELD_PCT, FALLBACK_RISK_FREE_RATE_PCT, FALLBACK_SPX_DIV_YIELD_PCT,
    RISK_FREE_RATE_MAX_PCT, RISK_FREE_RATE_MIN_PCT,
};
use crate::error::Result;
use crate::models::CarryParams;

/// Default rates endpoint; override with MARKETLENS_RATES_URL
const DEFAULT_RATES_URL: &str = "https://api.marketlens.dev/rates";

#[derive(Debug, Deserialize)]
struct RatesPayload {
    /// 13-week treasury yield, percent
    risk_free_rate_pct: f64,
    /// Trailing-12-month yields, percent
    ndx_div_yield_pct: f64,
    spx_div_yield_pct: f64,
}

pub struct RatesClient {
    http: reqwest::Client,
    base_url: String,
}

impl RatesClient {
    pub fn new() -> Self {
        let base_url =
            std::env::var("MARKETLENS_RATES_URL").unwrap_or_else(|_| DEFAULT_RATES_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { http, base_url }
    }

    /// Current carry params: live rates when available, fallbacks otherwise,
    /// expiration fields from the quarterly calendar
    pub async fn carry_params(&self) -> CarryParams {
        let now = Utc::now();
        let expiration = next_quarterly_expiration(now);

        let (rate, ndx_yield, spx_yield) = match self.fetch_rates().await {
            Ok(payload) => (
                sanity_bound_rate(payload.risk_free_rate_pct),
                payload.ndx_div_yield_pct,
                payload.spx_div_yield_pct,
            ),
            Err(e) => {
                warn!(error = %e, "rates fetch failed, using fallback constants");
                (
                    FALLBACK_RISK_FREE_RATE_PCT,
                    FALLBACK_NDX_DIV_YIELD_PCT,
                    FALLBACK_SPX_DIV_YIELD_PCT,
                )
            }
        };

        CarryParams::new(
            rate,
            ndx_yield,
            spx_yield,
            expiration.days_remaining as u32,
            expiration.date,
        )
    }

    async fn fetch_rates(&self) -> Result<RatesPayload> {
        let payload = self
            .http
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload)
    }
}

impl Default for RatesClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp an implausible rate print back to the fallback
fn sanity_bound_rate(rate_pct: f64) -> f64 {
    if (RISK_FREE_RATE_MIN_PCT..=RISK_FREE_RATE_MAX_PCT).contains(&rate_pct) {
        rate_pct
    } else {
        warn!(rate_pct, "risk-free rate outside plausible range, using fallback");
        FALLBACK_RISK_FREE_RATE_PCT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanity_bound_accepts_plausible_rates() {
        assert_eq!(sanity_bound_rate(4.5), 4.5);
        assert_eq!(sanity_bound_rate(0.0), 0.0);
        assert_eq!(sanity_bound_rate(12.0), 12.0);
    }

    #[test]
    fn test_sanity_bound_rejects_implausible_rates() {
        assert_eq!(sanity_bound_rate(-1.0), FALLBACK_RISK_FREE_RATE_PCT);
        assert_eq!(sanity_bound_rate(45.0), FALLBACK_RISK_FREE_RATE_PCT);
        assert_eq!(sanity_bound_rate(f64::NAN), FALLBACK_RISK_FREE_RATE_PCT);
    }

    #[tokio::test]
    async fn test_unreachable_provider_yields_fallback_params() {
        let client = RatesClient::with_base_url("http://127.0.0.1:9/rates".to_string());
        let params = client.carry_params().await;
        assert_eq!(params.risk_free_rate_pct, FALLBACK_RISK_FREE_RATE_PCT);
        assert_eq!(params.ndx_div_yield_pct, FALLBACK_NDX_DIV_YIELD_PCT);
        assert_eq!(params.spx_div_yield_pct, FALLBACK_SPX_DIV_YIELD_PCT);
        assert!(params.days_to_expiration >= 1);
    }
}
