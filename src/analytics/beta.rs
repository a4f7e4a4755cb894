//! Cross-index beta converter (experimental path)
//!
//! Converts among ES/NQ/SPX/NDX through "NDX-equivalent" space using the
//! single fundamental ratio NDX/SPX, treating NQ as NDX and ES as SPX. This
//! deliberately ignores each future's own carry premium: it trades accuracy
//! for a one-ratio mental model and is surfaced to users as approximate.
//! It must stay a separate code path from the main converter.

use crate::models::{PriceSnapshot, Ticker};

/// Convert between ES/NQ/SPX/NDX using only the NDX/SPX ratio
///
/// Returns None for tickers outside the four index-linked instruments.
pub fn convert_beta(value: f64, from: Ticker, to: Ticker, snapshot: &PriceSnapshot) -> Option<f64> {
    let ratio = snapshot.price(Ticker::Ndx) / snapshot.price(Ticker::Spx);
    let ndx_equivalent = value * to_ndx_factor(from, ratio)?;
    Some(ndx_equivalent / to_ndx_factor(to, ratio)?)
}

/// Factor taking one unit of the instrument into NDX-equivalent terms
fn to_ndx_factor(ticker: Ticker, ndx_spx_ratio: f64) -> Option<f64> {
    match ticker {
        // NQ ~ NDX equivalence
        Ticker::Nq | Ticker::Ndx => Some(1.0),
        // ES ~ SPX equivalence, lifted by the fundamental ratio
        Ticker::Es | Ticker::Spx => Some(ndx_spx_ratio),
        _ => None,
    }
}
