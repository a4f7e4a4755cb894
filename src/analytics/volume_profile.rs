//! Volume profile: POC, value area, and imbalance levels
//!
//! Buckets the window's price range into equal-width bins, assigning each
//! bar's volume to the bin holding its midpoint and splitting it into
//! estimated buy/sell volume by close position. Computed fresh per analysis
//! window, never persisted.

use serde::{Deserialize, Serialize};

use crate::constants::{
    PROFILE_DAILY_BARS, PROFILE_MONTHLY_BARS, PROFILE_WEEKLY_BARS, VALUE_AREA_FRACTION,
    VOLUME_PROFILE_BINS,
};
use crate::models::OhlcvBar;

/// Analysis horizon, expressed as bars sliced from the tail of the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileWindow {
    Daily,
    Weekly,
    Monthly,
}

impl ProfileWindow {
    pub fn bars(&self) -> usize {
        match self {
            ProfileWindow::Daily => PROFILE_DAILY_BARS,
            ProfileWindow::Weekly => PROFILE_WEEKLY_BARS,
            ProfileWindow::Monthly => PROFILE_MONTHLY_BARS,
        }
    }
}

/// Derived profile levels for one analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// Midpoint of the highest-volume bin
    pub poc: f64,
    pub value_area_high: f64,
    pub value_area_low: f64,
    /// Highest-buy-volume bin strictly below the value area, 0.0 if none
    pub buy_imbalance: f64,
    /// Highest-sell-volume bin strictly above the value area, 0.0 if none
    pub sell_imbalance: f64,
}

impl VolumeProfile {
    fn empty() -> Self {
        Self {
            poc: 0.0,
            value_area_high: 0.0,
            value_area_low: 0.0,
            buy_imbalance: 0.0,
            sell_imbalance: 0.0,
        }
    }
}

/// Profile over the trailing window for the given horizon
pub fn profile_for_window(bars: &[OhlcvBar], window: ProfileWindow) -> VolumeProfile {
    let start = bars.len().saturating_sub(window.bars());
    volume_profile(&bars[start..], VOLUME_PROFILE_BINS)
}

/// Build the profile from a bar window
///
/// Value area = the smallest set of bins, taken in descending-volume order,
/// whose cumulative volume reaches 70% of the total; its outer bounds give
/// VAH/VAL, which always bracket the POC.
pub fn volume_profile(bars: &[OhlcvBar], num_bins: usize) -> VolumeProfile {
    if bars.is_empty() || num_bins == 0 {
        return VolumeProfile::empty();
    }

    let price_low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let price_high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let span = price_high - price_low;

    // Whole window trades at a single price: every level collapses onto it.
    if span <= 0.0 {
        return VolumeProfile {
            poc: price_low,
            value_area_high: price_low,
            value_area_low: price_low,
            buy_imbalance: 0.0,
            sell_imbalance: 0.0,
        };
    }

    let bin_width = span / num_bins as f64;
    let mut total = vec![0.0f64; num_bins];
    let mut buy = vec![0.0f64; num_bins];
    let mut sell = vec![0.0f64; num_bins];

    for bar in bars {
        let volume = bar.volume as f64;
        if volume == 0.0 {
            continue;
        }
        let idx = (((bar.midpoint() - price_low) / bin_width).floor() as usize).min(num_bins - 1);
        // Zero-range bars split evenly; the close gives no side information
        let close_pos = bar.close_position().unwrap_or(0.5);
        total[idx] += volume;
        buy[idx] += volume * close_pos;
        sell[idx] += volume * (1.0 - close_pos);
    }

    let window_volume: f64 = total.iter().sum();
    if window_volume == 0.0 {
        return VolumeProfile::empty();
    }

    let bin_mid = |i: usize| price_low + (i as f64 + 0.5) * bin_width;

    let poc_idx = total
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    // Take bins in descending volume order until 70% of the window's volume
    // is captured; the outer bounds of that set are the value area.
    let mut order: Vec<usize> = (0..num_bins).collect();
    order.sort_by(|&a, &b| {
        total[b]
            .partial_cmp(&total[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let target = window_volume * VALUE_AREA_FRACTION;
    let mut accumulated = 0.0;
    let mut va_min = poc_idx;
    let mut va_max = poc_idx;
    for &idx in &order {
        accumulated += total[idx];
        va_min = va_min.min(idx);
        va_max = va_max.max(idx);
        if accumulated >= target {
            break;
        }
    }

    // Imbalance levels sit strictly outside the value area
    let buy_imbalance = best_level(&buy, 0..va_min, bin_mid);
    let sell_imbalance = best_level(&sell, (va_max + 1)..num_bins, bin_mid);

    VolumeProfile {
        poc: bin_mid(poc_idx),
        value_area_high: price_low + (va_max as f64 + 1.0) * bin_width,
        value_area_low: price_low + va_min as f64 * bin_width,
        buy_imbalance,
        sell_imbalance,
    }
}

/// Midpoint of the highest-volume bin within the index range, 0.0 when the
/// range is empty or holds no volume
fn best_level(
    volumes: &[f64],
    range: std::ops::Range<usize>,
    bin_mid: impl Fn(usize) -> f64,
) -> f64 {
    range
        .filter(|&i| volumes[i] > 0.0)
        .max_by(|&a, &b| {
            volumes[a]
                .partial_cmp(&volumes[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(bin_mid)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn bar(high: f64, low: f64, close: f64, volume: u64, i: i64) -> OhlcvBar {
        OhlcvBar::new(
            Utc::now() + Duration::minutes(i),
            (high + low) / 2.0,
            high,
            low,
            close,
            volume,
        )
    }

    /// A window with heavy volume clustered mid-range and thin tails
    fn clustered_bars() -> Vec<OhlcvBar> {
        vec![
            bar(101.0, 99.0, 99.5, 500, 0),
            bar(105.0, 103.0, 104.8, 5000, 1),
            bar(106.0, 104.0, 104.2, 6000, 2),
            bar(105.5, 103.5, 105.0, 5500, 3),
            bar(110.0, 108.0, 108.2, 400, 4),
        ]
    }

    #[test]
    fn test_value_area_brackets_poc() {
        let profile = volume_profile(&clustered_bars(), 50);
        assert!(profile.value_area_low <= profile.poc);
        assert!(profile.poc <= profile.value_area_high);
    }

    #[test]
    fn test_value_area_captures_seventy_percent() {
        let bars = clustered_bars();
        let profile = volume_profile(&bars, 50);

        // Re-bin and sum the volume landing inside [VAL, VAH]
        let total: f64 = bars.iter().map(|b| b.volume as f64).sum();
        let captured: f64 = bars
            .iter()
            .filter(|b| {
                let mid = b.midpoint();
                mid >= profile.value_area_low && mid <= profile.value_area_high
            })
            .map(|b| b.volume as f64)
            .sum();
        assert!(
            captured / total >= VALUE_AREA_FRACTION,
            "captured {captured} of {total}"
        );
    }

    #[test]
    fn test_poc_lands_on_heaviest_cluster() {
        let profile = volume_profile(&clustered_bars(), 50);
        // The 5000/6000/5500 cluster trades between 103 and 106
        assert!(profile.poc > 103.0 && profile.poc < 106.0, "poc {}", profile.poc);
    }

    #[test]
    fn test_imbalance_levels_outside_value_area() {
        let profile = volume_profile(&clustered_bars(), 50);
        if profile.buy_imbalance != 0.0 {
            assert!(profile.buy_imbalance < profile.value_area_low);
        }
        if profile.sell_imbalance != 0.0 {
            assert!(profile.sell_imbalance > profile.value_area_high);
        }
        // The thin tails at ~100 and ~109 sit outside the cluster
        assert!(profile.buy_imbalance != 0.0 || profile.sell_imbalance != 0.0);
    }

    #[test]
    fn test_empty_window_yields_zeroed_profile() {
        let profile = volume_profile(&[], 50);
        assert_eq!(profile, VolumeProfile::empty());
    }

    #[test]
    fn test_single_price_window_collapses() {
        let bars = vec![bar(100.0, 100.0, 100.0, 1000, 0)];
        let profile = volume_profile(&bars, 50);
        assert_eq!(profile.poc, 100.0);
        assert_eq!(profile.value_area_high, 100.0);
        assert_eq!(profile.value_area_low, 100.0);
    }

    #[test]
    fn test_zero_volume_window_yields_zeroed_profile() {
        let bars = vec![bar(105.0, 100.0, 102.0, 0, 0)];
        assert_eq!(volume_profile(&bars, 50), VolumeProfile::empty());
    }

    #[test]
    fn test_window_slicing() {
        // 30 bars; the monthly window sees the last 22, the weekly the last
        // 5. Early bars trade far away so the horizons must differ.
        let mut bars: Vec<OhlcvBar> = (0..25).map(|i| bar(51.0, 49.0, 50.0, 1000, i)).collect();
        for i in 25..30 {
            bars.push(bar(201.0, 199.0, 200.0, 1000, i));
        }

        let weekly = profile_for_window(&bars, ProfileWindow::Weekly);
        let monthly = profile_for_window(&bars, ProfileWindow::Monthly);
        assert!((weekly.poc - 200.0).abs() < 1.0);
        // Monthly window still holds 17 bars of the old range
        assert!(monthly.poc < 60.0, "monthly poc {}", monthly.poc);
    }

    #[test]
    fn test_daily_window_uses_last_bar_only() {
        let mut bars: Vec<OhlcvBar> = (0..5).map(|i| bar(51.0, 49.0, 50.0, 1000, i)).collect();
        bars.push(bar(201.0, 199.0, 200.0, 10, 5));
        let daily = profile_for_window(&bars, ProfileWindow::Daily);
        assert!((daily.poc - 200.0).abs() < 1.0);
    }
}
