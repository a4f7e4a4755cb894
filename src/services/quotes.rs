//! Quote snapshot provider
//!
//! Fetches the full ticker set concurrently from the configured quote
//! endpoint. Each ticker is fetched independently and tolerant of failure:
//! a failed or non-positive quote falls back to that ticker's hardcoded
//! default rather than failing the whole snapshot, so consumers always
//! receive a fully-populated snapshot.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{PriceSnapshot, Ticker};

/// Default quote endpoint; override with MARKETLENS_QUOTE_URL
const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct QuotePayload {
    price: f64,
}

pub struct QuoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new() -> Self {
        let base_url = std::env::var("MARKETLENS_QUOTE_URL")
            .unwrap_or_else(|_| DEFAULT_QUOTE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { http, base_url }
    }

    /// Fetch prices for the whole ticker set concurrently
    pub async fn fetch_snapshot(&self) -> PriceSnapshot {
        let (qqq, nq, ndx, spy, es, spx, gld, gc) = tokio::join!(
            self.price_or_fallback(Ticker::Qqq),
            self.price_or_fallback(Ticker::Nq),
            self.price_or_fallback(Ticker::Ndx),
            self.price_or_fallback(Ticker::Spy),
            self.price_or_fallback(Ticker::Es),
            self.price_or_fallback(Ticker::Spx),
            self.price_or_fallback(Ticker::Gld),
            self.price_or_fallback(Ticker::Gc),
        );

        PriceSnapshot {
            time: Utc::now(),
            qqq,
            nq,
            ndx,
            spy,
            es,
            spx,
            gld,
            gc,
        }
    }

    async fn price_or_fallback(&self, ticker: Ticker) -> f64 {
        match self.fetch_price(ticker).await {
            Ok(price) if price > 0.0 => price,
            Ok(price) => {
                warn!(%ticker, price, "non-positive quote, using fallback");
                ticker.fallback_price()
            }
            Err(e) => {
                warn!(%ticker, error = %e, "quote fetch failed, using fallback");
                ticker.fallback_price()
            }
        }
    }

    async fn fetch_price(&self, ticker: Ticker) -> Result<f64> {
        let url = format!("{}?symbol={}", self.base_url, ticker.as_str());
        debug!(%url, "fetching quote");
        let payload: QuotePayload = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload.price)
    }
}

impl Default for QuoteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_provider_falls_back_per_ticker() {
        // Nothing listens on this port, so every fetch fails and every
        // ticker gets its hardcoded default.
        let client = QuoteClient::with_base_url("http://127.0.0.1:9/quote".to_string());
        let snap = client.fetch_snapshot().await;
        for ticker in Ticker::ALL {
            assert_eq!(snap.price(ticker), ticker.fallback_price());
        }
    }
}
