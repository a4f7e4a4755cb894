use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar, day-level or intraday
///
/// Consumers assume the sequence they receive is chronologically ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Timestamp of the bar
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Traded volume
    pub volume: u64,
}

impl OhlcvBar {
    pub fn new(time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Typical price used by VWAP
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Midpoint used when bucketing volume into profile bins
    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Where the close sits within the bar's range, in [0, 1]
    ///
    /// None for zero-range bars, which order-flow estimators skip.
    pub fn close_position(&self) -> Option<f64> {
        let range = self.high - self.low;
        if range <= 0.0 {
            None
        } else {
            Some((self.close - self.low) / range)
        }
    }
}
