use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Ticker;

/// Point-in-time price for every ticker in the supported set
///
/// Immutable once handed to a conversion call. All prices are positive by
/// construction: the quote provider substitutes per-ticker fallbacks before
/// a snapshot ever reaches the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSnapshot {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    pub qqq: f64,
    pub nq: f64,
    pub ndx: f64,
    pub spy: f64,
    pub es: f64,
    pub spx: f64,
    pub gld: f64,
    pub gc: f64,
}

impl PriceSnapshot {
    /// Explicit enumerated accessor, no string-keyed lookup
    pub fn price(&self, ticker: Ticker) -> f64 {
        match ticker {
            Ticker::Qqq => self.qqq,
            Ticker::Nq => self.nq,
            Ticker::Ndx => self.ndx,
            Ticker::Spy => self.spy,
            Ticker::Es => self.es,
            Ticker::Spx => self.spx,
            Ticker::Gld => self.gld,
            Ticker::Gc => self.gc,
        }
    }

    pub fn set_price(&mut self, ticker: Ticker, price: f64) {
        match ticker {
            Ticker::Qqq => self.qqq = price,
            Ticker::Nq => self.nq = price,
            Ticker::Ndx => self.ndx = price,
            Ticker::Spy => self.spy = price,
            Ticker::Es => self.es = price,
            Ticker::Spx => self.spx = price,
            Ticker::Gld => self.gld = price,
            Ticker::Gc => self.gc = price,
        }
    }

    /// Snapshot populated entirely from fallback constants
    pub fn fallback(time: DateTime<Utc>) -> Self {
        let mut snap = Self {
            time,
            qqq: 0.0,
            nq: 0.0,
            ndx: 0.0,
            spy: 0.0,
            es: 0.0,
            spx: 0.0,
            gld: 0.0,
            gc: 0.0,
        };
        for ticker in Ticker::ALL {
            snap.set_price(ticker, ticker.fallback_price());
        }
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_snapshot_fully_populated() {
        let snap = PriceSnapshot::fallback(Utc::now());
        for ticker in Ticker::ALL {
            assert!(snap.price(ticker) > 0.0, "{} must be positive", ticker);
        }
    }

    #[test]
    fn test_accessor_round_trip() {
        let mut snap = PriceSnapshot::fallback(Utc::now());
        snap.set_price(Ticker::Ndx, 25748.49);
        assert_eq!(snap.price(Ticker::Ndx), 25748.49);
    }
}
