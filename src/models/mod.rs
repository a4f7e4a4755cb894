mod alert;
mod carry_params;
mod ohlcv;
mod premium;
mod snapshot;
mod ticker;

pub use alert::{AlertCondition, PriceAlert};
pub use carry_params::CarryParams;
pub use ohlcv::OhlcvBar;
pub use premium::PremiumInfo;
pub use snapshot::PriceSnapshot;
pub use ticker::{InstrumentFamily, Ticker};
