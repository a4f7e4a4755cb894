use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::InstrumentFamily;
use crate::constants::{FALLBACK_NDX_DIV_YIELD_PCT, FALLBACK_SPX_DIV_YIELD_PCT};

/// Inputs to the cost-of-carry formula
///
/// `days_to_expiration` is clamped to a minimum of 1 so the carry multiplier
/// never degenerates to exactly 1.0 on expiration day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarryParams {
    /// Short-term risk-free rate, percent
    pub risk_free_rate_pct: f64,

    /// Trailing dividend yield for the Nasdaq-100 family, percent
    pub ndx_div_yield_pct: f64,

    /// Trailing dividend yield for the S&P 500 family, percent
    pub spx_div_yield_pct: f64,

    /// Calendar days until the quarterly expiration, always >= 1
    pub days_to_expiration: u32,

    /// The quarterly expiration date itself
    pub expiration_date: NaiveDate,
}

impl CarryParams {
    pub fn new(
        risk_free_rate_pct: f64,
        ndx_div_yield_pct: f64,
        spx_div_yield_pct: f64,
        days_to_expiration: u32,
        expiration_date: NaiveDate,
    ) -> Self {
        Self {
            risk_free_rate_pct,
            ndx_div_yield_pct,
            spx_div_yield_pct,
            days_to_expiration: days_to_expiration.max(1),
            expiration_date,
        }
    }

    /// Dividend yield percent by instrument family; zero for the commodity
    /// class, which has no dividend stream
    pub fn div_yield_pct(&self, family: InstrumentFamily) -> f64 {
        match family {
            InstrumentFamily::Nasdaq => self.ndx_div_yield_pct,
            InstrumentFamily::Sp500 => self.spx_div_yield_pct,
            InstrumentFamily::Gold => 0.0,
        }
    }
}

impl Default for CarryParams {
    fn default() -> Self {
        Self::new(
            crate::constants::FALLBACK_RISK_FREE_RATE_PCT,
            FALLBACK_NDX_DIV_YIELD_PCT,
            FALLBACK_SPX_DIV_YIELD_PCT,
            45,
            NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_to_expiration_never_zero() {
        let params = CarryParams::new(4.5, 0.66, 1.3, 0, NaiveDate::from_ymd_opt(2026, 9, 18).unwrap());
        assert_eq!(params.days_to_expiration, 1);
    }

    #[test]
    fn test_div_yield_by_family() {
        let params = CarryParams::default();
        assert_eq!(params.div_yield_pct(InstrumentFamily::Nasdaq), 0.66);
        assert_eq!(params.div_yield_pct(InstrumentFamily::Sp500), 1.30);
        assert_eq!(params.div_yield_pct(InstrumentFamily::Gold), 0.0);
    }
}
