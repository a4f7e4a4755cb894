//! Futures premium analysis

use super::carry::carry_price;
use crate::models::{CarryParams, PremiumInfo, Ticker};
use crate::utils::{round2, round4};

/// Theoretical-vs-actual premium for a futures contract over its underlying
///
/// The dividend yield is selected by the future's family (zero for gold).
/// Rounding happens exactly once here at the boundary; the intermediate
/// carry math runs at full precision. Returns None for non-futures tickers,
/// which have no contract multiplier.
pub fn premium_info(
    spot: f64,
    futures_actual: f64,
    future: Ticker,
    params: &CarryParams,
) -> Option<PremiumInfo> {
    let multiplier = future.contract_multiplier()?;
    let div_yield = params.div_yield_pct(future.family());

    let theoretical = carry_price(
        spot,
        params.risk_free_rate_pct,
        div_yield,
        params.days_to_expiration,
    );
    let premium = theoretical - spot;

    Some(PremiumInfo {
        theoretical: round2(theoretical),
        actual: round2(futures_actual),
        points: round2(premium),
        percent: round4(premium / spot * 100.0),
        dollars: round2(premium * multiplier),
    })
}
