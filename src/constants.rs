//! Numeric policy and heuristic threshold constants
//!
//! Every scoring threshold used by the analytics engine lives here as a
//! named constant so tests can probe boundary behavior exactly at the
//! threshold values instead of chasing embedded literals.

/// Day-count denominator for the cost-of-carry time fraction
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Default risk-free rate percent when the rates provider is unavailable
pub const FALLBACK_RISK_FREE_RATE_PCT: f64 = 4.5;

/// Plausible bounds for a short-term government rate, percent
pub const RISK_FREE_RATE_MIN_PCT: f64 = 0.0;
pub const RISK_FREE_RATE_MAX_PCT: f64 = 12.0;

/// Trailing-12-month dividend yield fallbacks, percent
pub const FALLBACK_NDX_DIV_YIELD_PCT: f64 = 0.66;
pub const FALLBACK_SPX_DIV_YIELD_PCT: f64 = 1.30;

// Volume profile
/// Number of equal-width price bins in a volume profile
pub const VOLUME_PROFILE_BINS: usize = 50;
/// Fraction of total volume captured by the value area
pub const VALUE_AREA_FRACTION: f64 = 0.70;

// Analysis horizons, in bars sliced from the tail of the series
pub const PROFILE_DAILY_BARS: usize = 1;
pub const PROFILE_WEEKLY_BARS: usize = 5;
pub const PROFILE_MONTHLY_BARS: usize = 22;

// Order flow
/// Fixed band width when a VWAP window has zero total volume
pub const VWAP_FALLBACK_BAND: f64 = 50.0;
/// Bars summed for the "recent" volume delta
pub const CVD_RECENT_BARS: usize = 5;
/// Bars averaged for the order-flow imbalance
pub const OFI_WINDOW_BARS: usize = 10;
/// Mean imbalance above which buyers are the labeled aggressor
pub const OFI_AGGRESSOR_THRESHOLD: f64 = 0.1;
/// Bars scanned for block trades
pub const BLOCK_WINDOW_BARS: usize = 10;
/// Volume z-score above which a bar counts as a block trade
pub const BLOCK_TRADE_Z_SCORE: f64 = 2.0;

// Market regime
/// VIX level thresholds separating the four volatility regimes
pub const VIX_LOW_FEAR_MAX: f64 = 15.0;
pub const VIX_NORMAL_MAX: f64 = 20.0;
pub const VIX_ELEVATED_MAX: f64 = 25.0;
/// VIX deviation from its trailing average, percent, for risk sentiment
pub const RISK_ON_DEVIATION_PCT: f64 = -10.0;
pub const RISK_OFF_DEVIATION_PCT: f64 = 15.0;
/// Trailing bars for the VIX average and the NQ/SPY return correlation
pub const REGIME_LOOKBACK_BARS: usize = 20;
/// Bars for the sector momentum percent change
pub const SECTOR_MOMENTUM_BARS: usize = 5;
/// NQ/SPY return correlation below which the tape is treated as divergent
pub const CORRELATION_DIVERGENCE_MAX: f64 = 0.5;

/// Sector ETF symbols scanned for rotation
pub const SECTOR_ETFS: &[&str] = &["XLK", "XLF", "XLE", "XLV", "XLY", "XLI", "XLP", "XLU"];

/// Symbol used for the volatility index series
pub const VIX_SYMBOL: &str = "^VIX";

/// Default path for the persisted alert store
pub const ALERT_STORE_FILE: &str = "alerts.json";
