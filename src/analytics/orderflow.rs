//! Order-flow analytics over an ordered OHLCV bar sequence
//!
//! Everything here is a point-in-time estimate from bar data, not an
//! order-book reconstruction: CVD signs volume by bar-over-bar close
//! direction, and the buy/sell split is inferred from where the close sits
//! inside each bar's range. Empty input always yields zeroed/neutral
//! defaults, never an error.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLOCK_TRADE_Z_SCORE, BLOCK_WINDOW_BARS, CVD_RECENT_BARS, OFI_AGGRESSOR_THRESHOLD,
    OFI_WINDOW_BARS, VWAP_FALLBACK_BAND,
};
use crate::models::OhlcvBar;

/// Net flow direction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowDirection {
    Buying,
    Selling,
    Neutral,
}

impl FlowDirection {
    fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            FlowDirection::Buying
        } else if value < 0.0 {
            FlowDirection::Selling
        } else {
            FlowDirection::Neutral
        }
    }
}

/// Dominant aggressor side label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggressor {
    Buyers,
    Sellers,
    Balanced,
}

/// Volume-weighted average price with one-sigma bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VwapBands {
    pub vwap: f64,
    pub upper: f64,
    pub lower: f64,
}

/// VWAP of typical price (H+L+C)/3 with bands at +/- one volume-weighted
/// standard deviation, computed via E[tp^2] - E[tp]^2
///
/// A zero-total-volume window falls back to the last close with a fixed
/// 50-point band. Empty input yields all zeros.
pub fn vwap_bands(bars: &[OhlcvBar]) -> VwapBands {
    if bars.is_empty() {
        return VwapBands {
            vwap: 0.0,
            upper: 0.0,
            lower: 0.0,
        };
    }

    let total_volume: f64 = bars.iter().map(|b| b.volume as f64).sum();
    if total_volume == 0.0 {
        let last_close = bars[bars.len() - 1].close;
        return VwapBands {
            vwap: last_close,
            upper: last_close + VWAP_FALLBACK_BAND,
            lower: last_close - VWAP_FALLBACK_BAND,
        };
    }

    let mut weighted_tp = 0.0;
    let mut weighted_tp_sq = 0.0;
    for bar in bars {
        let tp = bar.typical_price();
        let v = bar.volume as f64;
        weighted_tp += tp * v;
        weighted_tp_sq += tp * tp * v;
    }

    let vwap = weighted_tp / total_volume;
    // Guard the sqrt: float cancellation can push the variance a hair
    // below zero on near-constant windows.
    let variance = (weighted_tp_sq / total_volume - vwap * vwap).max(0.0);
    let sigma = variance.sqrt();

    VwapBands {
        vwap,
        upper: vwap + sigma,
        lower: vwap - sigma,
    }
}

/// Cumulative volume delta summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDelta {
    /// Signed volume summed across the whole window
    pub cumulative: f64,
    /// Signed volume summed over the last 5 bars
    pub recent: f64,
    pub direction: FlowDirection,
}

/// CVD from bar-over-bar close direction
///
/// The first bar has no prior close and contributes no delta. Direction is
/// labeled from the sign of the recent delta.
pub fn cumulative_volume_delta(bars: &[OhlcvBar]) -> VolumeDelta {
    let deltas: Vec<f64> = bars
        .windows(2)
        .map(|w| {
            let v = w[1].volume as f64;
            if w[1].close > w[0].close {
                v
            } else if w[1].close < w[0].close {
                -v
            } else {
                0.0
            }
        })
        .collect();

    let cumulative: f64 = deltas.iter().sum();
    let recent: f64 = deltas
        .iter()
        .rev()
        .take(CVD_RECENT_BARS)
        .sum();

    VolumeDelta {
        cumulative,
        recent,
        direction: FlowDirection::from_sign(recent),
    }
}

/// Order-flow imbalance summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFlowImbalance {
    /// Mean of (buy - sell) / total over the trailing window, in [-1, 1]
    pub imbalance: f64,
    pub aggressor: Aggressor,
}

/// Aggressor-side estimate from close position within each bar's range
///
/// Buy volume per bar = volume * closePosition, sell volume the remainder;
/// the per-bar imbalance reduces to 2*closePosition - 1. Zero-range bars
/// are skipped entirely.
pub fn order_flow_imbalance(bars: &[OhlcvBar]) -> OrderFlowImbalance {
    let start = bars.len().saturating_sub(OFI_WINDOW_BARS);
    let mut sum = 0.0;
    let mut count = 0usize;
    for bar in &bars[start..] {
        if let Some(cp) = bar.close_position() {
            sum += 2.0 * cp - 1.0;
            count += 1;
        }
    }

    let imbalance = if count == 0 { 0.0 } else { sum / count as f64 };
    let aggressor = if imbalance > OFI_AGGRESSOR_THRESHOLD {
        Aggressor::Buyers
    } else if imbalance < -OFI_AGGRESSOR_THRESHOLD {
        Aggressor::Sellers
    } else {
        Aggressor::Balanced
    };

    OrderFlowImbalance {
        imbalance,
        aggressor,
    }
}

/// Block-trade detection summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTradeSummary {
    /// Count of block bars in the recent window
    pub block_bars: usize,
    /// Net +1/-1 flow counter across those bars
    pub net_flow: i32,
    pub label: FlowDirection,
}

/// Unusually large bars in the recent window, by volume z-score against the
/// whole window's mean and standard deviation
///
/// Each block bar contributes +1 when it closed above its open, otherwise
/// -1; the net counter's sign labels institutional buying or selling.
pub fn block_trades(bars: &[OhlcvBar]) -> BlockTradeSummary {
    if bars.is_empty() {
        return BlockTradeSummary {
            block_bars: 0,
            net_flow: 0,
            label: FlowDirection::Neutral,
        };
    }

    let n = bars.len() as f64;
    let mean = bars.iter().map(|b| b.volume as f64).sum::<f64>() / n;
    let variance = bars
        .iter()
        .map(|b| {
            let d = b.volume as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();

    let mut block_bars = 0usize;
    let mut net_flow = 0i32;
    if stddev > 0.0 {
        let start = bars.len().saturating_sub(BLOCK_WINDOW_BARS);
        for bar in &bars[start..] {
            let z = (bar.volume as f64 - mean) / stddev;
            if z > BLOCK_TRADE_Z_SCORE {
                block_bars += 1;
                net_flow += if bar.close > bar.open { 1 } else { -1 };
            }
        }
    }

    BlockTradeSummary {
        block_bars,
        net_flow,
        label: FlowDirection::from_sign(net_flow as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn bar(open: f64, high: f64, low: f64, close: f64, volume: u64, i: i64) -> OhlcvBar {
        OhlcvBar::new(Utc::now() + Duration::minutes(i), open, high, low, close, volume)
    }

    fn bars_from_closes(closes: &[f64], volume: u64) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bar(c, c + 1.0, c - 1.0, c, volume, i as i64))
            .collect()
    }

    #[test]
    fn test_vwap_bounds_invariant() {
        let bars = vec![
            bar(100.0, 105.0, 99.0, 104.0, 1200, 0),
            bar(104.0, 108.0, 103.0, 107.0, 800, 1),
            bar(107.0, 109.0, 102.0, 103.0, 1500, 2),
        ];
        let bands = vwap_bands(&bars);
        assert!(bands.lower <= bands.vwap);
        assert!(bands.vwap <= bands.upper);
    }

    #[test]
    fn test_vwap_weights_by_volume() {
        // Almost all volume at the second bar's typical price
        let bars = vec![
            bar(100.0, 100.0, 100.0, 100.0, 1, 0),
            bar(200.0, 200.0, 200.0, 200.0, 999_999, 1),
        ];
        let bands = vwap_bands(&bars);
        assert!((bands.vwap - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_vwap_zero_volume_fallback() {
        let bars = vec![bar(100.0, 105.0, 95.0, 102.0, 0, 0)];
        let bands = vwap_bands(&bars);
        assert_eq!(bands.vwap, 102.0);
        assert_eq!(bands.upper, 152.0);
        assert_eq!(bands.lower, 52.0);
    }

    #[test]
    fn test_vwap_empty_input() {
        let bands = vwap_bands(&[]);
        assert_eq!(bands.vwap, 0.0);
        assert_eq!(bands.upper, 0.0);
        assert_eq!(bands.lower, 0.0);
    }

    #[test]
    fn test_cvd_alternating_closes_cancel() {
        // Five bars, four deltas: +1000 -1000 +1000 -1000
        let bars = bars_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0], 1000);
        let delta = cumulative_volume_delta(&bars);
        assert_eq!(delta.cumulative, 0.0);
        assert_eq!(delta.recent, 0.0);
        assert_eq!(delta.direction, FlowDirection::Neutral);
    }

    #[test]
    fn test_cvd_buying_pressure() {
        let bars = bars_from_closes(&[100.0, 101.0, 102.0, 103.0], 500);
        let delta = cumulative_volume_delta(&bars);
        assert_eq!(delta.cumulative, 1500.0);
        assert_eq!(delta.direction, FlowDirection::Buying);
    }

    #[test]
    fn test_cvd_recent_window_differs_from_cumulative() {
        // Long rally then a heavy last-5 selloff
        let closes = vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 104.0, 103.0, 102.0, 101.0, 100.0];
        let bars = bars_from_closes(&closes, 100);
        let delta = cumulative_volume_delta(&bars);
        assert_eq!(delta.cumulative, 0.0);
        assert_eq!(delta.recent, -500.0);
        assert_eq!(delta.direction, FlowDirection::Selling);
    }

    #[test]
    fn test_cvd_empty_and_single_bar() {
        assert_eq!(cumulative_volume_delta(&[]).direction, FlowDirection::Neutral);
        let one = bars_from_closes(&[100.0], 1000);
        let delta = cumulative_volume_delta(&one);
        assert_eq!(delta.cumulative, 0.0);
    }

    #[test]
    fn test_ofi_buyers_dominant() {
        // Closes pinned at the high: close position 1.0, imbalance 1.0
        let bars: Vec<OhlcvBar> = (0..10)
            .map(|i| bar(100.0, 110.0, 100.0, 110.0, 1000, i))
            .collect();
        let ofi = order_flow_imbalance(&bars);
        assert!((ofi.imbalance - 1.0).abs() < 1e-12);
        assert_eq!(ofi.aggressor, Aggressor::Buyers);
    }

    #[test]
    fn test_ofi_threshold_boundary() {
        // Close position 0.549 -> imbalance 0.098, just under the 0.1
        // threshold: still BALANCED
        let below: Vec<OhlcvBar> = (0..10)
            .map(|i| bar(100.0, 110.0, 100.0, 105.49, 1000, i))
            .collect();
        assert_eq!(order_flow_imbalance(&below).aggressor, Aggressor::Balanced);

        // Close position 0.56 -> imbalance 0.12, just over: BUYERS
        let above: Vec<OhlcvBar> = (0..10)
            .map(|i| bar(100.0, 110.0, 100.0, 105.6, 1000, i))
            .collect();
        assert_eq!(order_flow_imbalance(&above).aggressor, Aggressor::Buyers);
    }

    #[test]
    fn test_ofi_skips_zero_range_bars() {
        let mut bars: Vec<OhlcvBar> = (0..5)
            .map(|i| bar(100.0, 100.0, 100.0, 100.0, 1000, i))
            .collect();
        bars.push(bar(100.0, 110.0, 100.0, 101.0, 1000, 5));
        let ofi = order_flow_imbalance(&bars);
        // Only the last bar counts: 2 * 0.1 - 1 = -0.8
        assert!((ofi.imbalance + 0.8).abs() < 1e-12);
        assert_eq!(ofi.aggressor, Aggressor::Sellers);
    }

    #[test]
    fn test_ofi_all_zero_range_is_balanced() {
        let bars: Vec<OhlcvBar> = (0..5)
            .map(|i| bar(100.0, 100.0, 100.0, 100.0, 1000, i))
            .collect();
        let ofi = order_flow_imbalance(&bars);
        assert_eq!(ofi.imbalance, 0.0);
        assert_eq!(ofi.aggressor, Aggressor::Balanced);
    }

    #[test]
    fn test_block_trades_detects_volume_spike() {
        // 29 quiet bars, then one 10x up bar
        let mut bars: Vec<OhlcvBar> = (0..29)
            .map(|i| bar(100.0, 101.0, 99.0, 100.5, 1000, i))
            .collect();
        bars.push(bar(100.0, 103.0, 100.0, 103.0, 10_000, 29));

        let summary = block_trades(&bars);
        assert_eq!(summary.block_bars, 1);
        assert_eq!(summary.net_flow, 1);
        assert_eq!(summary.label, FlowDirection::Buying);
    }

    #[test]
    fn test_block_trades_down_bar_counts_negative() {
        let mut bars: Vec<OhlcvBar> = (0..29)
            .map(|i| bar(100.0, 101.0, 99.0, 100.5, 1000, i))
            .collect();
        bars.push(bar(103.0, 103.0, 99.0, 99.5, 10_000, 29));

        let summary = block_trades(&bars);
        assert_eq!(summary.net_flow, -1);
        assert_eq!(summary.label, FlowDirection::Selling);
    }

    #[test]
    fn test_block_trades_uniform_volume_is_neutral() {
        let bars: Vec<OhlcvBar> = (0..20)
            .map(|i| bar(100.0, 101.0, 99.0, 100.5, 1000, i))
            .collect();
        let summary = block_trades(&bars);
        assert_eq!(summary.block_bars, 0);
        assert_eq!(summary.label, FlowDirection::Neutral);
    }

    #[test]
    fn test_block_trades_empty_input() {
        let summary = block_trades(&[]);
        assert_eq!(summary.label, FlowDirection::Neutral);
    }
}
