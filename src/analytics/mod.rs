//! Core financial math: pure, synchronous functions over immutable inputs
//!
//! Nothing in this module performs I/O, holds a lock, or mutates shared
//! state, so every function here is safe to call concurrently.

pub mod beta;
pub mod carry;
pub mod convert;
pub mod orderflow;
pub mod premium;
pub mod regime;
pub mod volume_profile;

pub use beta::convert_beta;
pub use carry::{carry_multiplier, carry_price, next_quarterly_expiration, QuarterlyExpiration};
pub use convert::{convert, ConversionPolicy};
pub use orderflow::{
    block_trades, cumulative_volume_delta, order_flow_imbalance, vwap_bands, Aggressor,
    BlockTradeSummary, FlowDirection, OrderFlowImbalance, VolumeDelta, VwapBands,
};
pub use premium::premium_info;
pub use regime::{
    classify_regime, news_outcome_prediction, session_open_prediction, Confidence, Direction,
    GammaRegime, Prediction, RegimeInputs, RegimeSnapshot, RiskSentiment, SectorMomentum,
    VolatilityRegime,
};
pub use volume_profile::{profile_for_window, volume_profile, ProfileWindow, VolumeProfile};
