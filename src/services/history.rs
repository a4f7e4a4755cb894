//! OHLCV history provider
//!
//! Returns an ordered bar sequence for a symbol and lookback window. An
//! empty sequence is a valid "no data" response: the analytics engine
//! handles it with zeroed/neutral defaults, so fetch failures degrade to
//! empty rather than erroring the whole analysis.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::OhlcvBar;

/// Default history endpoint; override with MARKETLENS_HISTORY_URL
const DEFAULT_HISTORY_URL: &str = "https://api.marketlens.dev/history";

pub struct HistoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new() -> Self {
        let base_url = std::env::var("MARKETLENS_HISTORY_URL")
            .unwrap_or_else(|_| DEFAULT_HISTORY_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self { http, base_url }
    }

    /// Bars for `symbol`, ascending, at most `lookback` of them
    pub async fn fetch_bars(&self, symbol: &str, lookback: usize) -> Vec<OhlcvBar> {
        match self.try_fetch_bars(symbol, lookback).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!(symbol, error = %e, "history fetch failed, treating as no data");
                Vec::new()
            }
        }
    }

    /// Close series convenience for regime inputs
    pub async fn fetch_closes(&self, symbol: &str, lookback: usize) -> Vec<f64> {
        self.fetch_bars(symbol, lookback)
            .await
            .iter()
            .map(|b| b.close)
            .collect()
    }

    async fn try_fetch_bars(&self, symbol: &str, lookback: usize) -> Result<Vec<OhlcvBar>> {
        let url = format!("{}?symbol={}&lookback={}", self.base_url, symbol, lookback);
        debug!(%url, "fetching history");
        let mut bars: Vec<OhlcvBar> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        // Consumers assume ascending order
        bars.sort_by_key(|b| b.time);
        if bars.len() > lookback {
            bars.drain(..bars.len() - lookback);
        }
        Ok(bars)
    }
}

impl Default for HistoryClient {
    fn default() -> Self {
        Self::new()
    }
}
