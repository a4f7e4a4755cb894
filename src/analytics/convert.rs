//! Cross-instrument price conversion
//!
//! Converts a value between any two supported tickers using, in priority
//! order: identity, live snapshot ratios for spot-to-spot pairs, the carry
//! formula for index/future pairs, and a configurable policy for equity
//! ETF/future pairs. Ratios are always derived freshly from the snapshot at
//! call time, never cached, so they drift with each new snapshot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::carry::carry_multiplier;
use crate::models::{CarryParams, InstrumentFamily, PriceSnapshot, Ticker};

/// How equity ETF <-> future pairs (QQQ/NQ, SPY/ES) are converted
///
/// Two policies ship because both are defensible products: `LiveRatio`
/// tracks the market's own basis embedded in the two prices, `CarryChained`
/// routes through the cash index and prices the basis from carry instead.
/// The default is `LiveRatio`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionPolicy {
    /// Pure snapshot ratio between the ETF and the future
    #[default]
    LiveRatio,
    /// ETF to cash index by live ratio, then index to future by carry
    CarryChained,
}

/// Convert `value` from one instrument's terms to another's
///
/// Total function: a pair with no conversion rule returns the value
/// unchanged (deliberate no-op, logged at debug). NaN rejection is the
/// caller boundary's job; this function never fails.
pub fn convert(
    value: f64,
    from: Ticker,
    to: Ticker,
    snapshot: &PriceSnapshot,
    params: &CarryParams,
    policy: ConversionPolicy,
) -> f64 {
    use Ticker::*;

    if from == to {
        return value;
    }

    match (from, to) {
        // Index -> future applies carry forward; the reverse divides by the
        // same multiplier recomputed from current params, so a round trip is
        // exact up to float epsilon.
        (Ndx, Nq) | (Spx, Es) => value * family_carry(params, from.family()),
        (Nq, Ndx) | (Es, Spx) => value / family_carry(params, from.family()),

        // Equity ETF <-> future: policy decides between a pure live ratio
        // and chaining through the cash index with a carry leg.
        (Qqq, Nq) | (Spy, Es) => match policy {
            ConversionPolicy::LiveRatio => value * live_ratio(snapshot, from, to),
            ConversionPolicy::CarryChained => {
                let index = index_leg(from.family());
                value * live_ratio(snapshot, from, index) * family_carry(params, from.family())
            }
        },
        (Nq, Qqq) | (Es, Spy) => match policy {
            ConversionPolicy::LiveRatio => value * live_ratio(snapshot, from, to),
            ConversionPolicy::CarryChained => {
                let index = index_leg(from.family());
                value / family_carry(params, from.family()) * live_ratio(snapshot, index, to)
            }
        },

        // Spot-to-spot pairs carry no time-value-of-money gap, so a live
        // ratio is the whole story: same-family ETF <-> index, the two cash
        // indices against each other, the two index ETFs against each other,
        // and the gold proxy pair.
        (Qqq, Ndx) | (Ndx, Qqq) | (Spy, Spx) | (Spx, Spy) | (Ndx, Spx) | (Spx, Ndx)
        | (Qqq, Spy) | (Spy, Qqq) | (Gld, Gc) | (Gc, Gld) => {
            value * live_ratio(snapshot, from, to)
        }

        // No rule: deliberate identity fallback, not an error.
        _ => {
            debug!(from = %from, to = %to, "no conversion rule for pair, returning value unchanged");
            value
        }
    }
}

/// Fresh market ratio between two snapshot prices
fn live_ratio(snapshot: &PriceSnapshot, from: Ticker, to: Ticker) -> f64 {
    snapshot.price(to) / snapshot.price(from)
}

fn family_carry(params: &CarryParams, family: InstrumentFamily) -> f64 {
    carry_multiplier(
        params.risk_free_rate_pct,
        params.div_yield_pct(family),
        params.days_to_expiration,
    )
}

/// Cash index leg used when chaining an equity ETF through carry
fn index_leg(family: InstrumentFamily) -> Ticker {
    match family {
        InstrumentFamily::Nasdaq => Ticker::Ndx,
        InstrumentFamily::Sp500 => Ticker::Spx,
        // Gold never chains; its ETF/future pair is always a live ratio
        InstrumentFamily::Gold => Ticker::Gc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot() -> PriceSnapshot {
        PriceSnapshot {
            time: Utc::now(),
            qqq: 540.25,
            nq: 23310.0,
            ndx: 23180.5,
            spy: 644.10,
            es: 6512.25,
            spx: 6481.9,
            gld: 312.40,
            gc: 3391.2,
        }
    }

    fn params() -> CarryParams {
        CarryParams::default()
    }

    #[test]
    fn test_identity_for_every_ticker() {
        let snap = snapshot();
        let p = params();
        for ticker in Ticker::ALL {
            for policy in [ConversionPolicy::LiveRatio, ConversionPolicy::CarryChained] {
                assert_eq!(convert(123.45, ticker, ticker, &snap, &p, policy), 123.45);
            }
        }
    }

    #[test]
    fn test_index_to_future_applies_carry() {
        let snap = snapshot();
        let p = params();
        let nq = convert(25748.49, Ticker::Ndx, Ticker::Nq, &snap, &p, ConversionPolicy::LiveRatio);
        assert!((nq - 25870.68).abs() < 0.01, "got {nq}");
    }

    #[test]
    fn test_round_trip_all_invertible_pairs() {
        let snap = snapshot();
        let p = params();
        let pairs = [
            (Ticker::Ndx, Ticker::Nq),
            (Ticker::Spx, Ticker::Es),
            (Ticker::Qqq, Ticker::Nq),
            (Ticker::Spy, Ticker::Es),
            (Ticker::Qqq, Ticker::Ndx),
            (Ticker::Spy, Ticker::Spx),
            (Ticker::Ndx, Ticker::Spx),
            (Ticker::Qqq, Ticker::Spy),
            (Ticker::Gld, Ticker::Gc),
        ];
        for policy in [ConversionPolicy::LiveRatio, ConversionPolicy::CarryChained] {
            for (a, b) in pairs {
                for value in [0.01, 1.0, 542.33, 25748.49] {
                    let there = convert(value, a, b, &snap, &p, policy);
                    let back = convert(there, b, a, &snap, &p, policy);
                    assert!(
                        (back - value).abs() / value < 1e-9,
                        "{a}->{b} round trip drifted under {policy:?}: {value} -> {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_policies_disagree_on_etf_future() {
        // The live QQQ/NQ ratio embeds the market basis; the chained path
        // prices the basis from carry. With this snapshot they differ.
        let snap = snapshot();
        let p = params();
        let live = convert(540.25, Ticker::Qqq, Ticker::Nq, &snap, &p, ConversionPolicy::LiveRatio);
        let chained =
            convert(540.25, Ticker::Qqq, Ticker::Nq, &snap, &p, ConversionPolicy::CarryChained);
        assert!((live - snap.nq).abs() < 1e-6);
        assert!((live - chained).abs() > 1.0);
    }

    #[test]
    fn test_carry_chained_matches_manual_chain() {
        let snap = snapshot();
        let p = params();
        let chained =
            convert(540.25, Ticker::Qqq, Ticker::Nq, &snap, &p, ConversionPolicy::CarryChained);
        let manual = {
            let ndx = 540.25 * snap.ndx / snap.qqq;
            convert(ndx, Ticker::Ndx, Ticker::Nq, &snap, &p, ConversionPolicy::CarryChained)
        };
        assert!((chained - manual).abs() < 1e-9);
    }

    #[test]
    fn test_gold_pair_is_live_ratio_under_both_policies() {
        let snap = snapshot();
        let p = params();
        for policy in [ConversionPolicy::LiveRatio, ConversionPolicy::CarryChained] {
            let gc = convert(snap.gld, Ticker::Gld, Ticker::Gc, &snap, &p, policy);
            assert!((gc - snap.gc).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unsupported_pair_is_identity_noop() {
        let snap = snapshot();
        let p = params();
        // No rule links the gold family to the equity families
        assert_eq!(
            convert(100.0, Ticker::Gld, Ticker::Nq, &snap, &p, ConversionPolicy::LiveRatio),
            100.0
        );
        assert_eq!(
            convert(7.5, Ticker::Es, Ticker::Gc, &snap, &p, ConversionPolicy::CarryChained),
            7.5
        );
    }
}
