use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The closed set of instruments the converter understands
///
/// Unknown symbols are rejected when parsing at the API/CLI boundary, so the
/// core never deals in raw ticker strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Ticker {
    Qqq,
    Nq,
    Ndx,
    Spy,
    Es,
    Spx,
    Gld,
    Gc,
}

/// Underlying family an instrument tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentFamily {
    Nasdaq,
    Sp500,
    Gold,
}

impl Ticker {
    pub const ALL: [Ticker; 8] = [
        Ticker::Qqq,
        Ticker::Nq,
        Ticker::Ndx,
        Ticker::Spy,
        Ticker::Es,
        Ticker::Spx,
        Ticker::Gld,
        Ticker::Gc,
    ];

    /// Parse a symbol string, rejecting anything outside the known set
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s.to_uppercase().as_str() {
            "QQQ" => Ok(Ticker::Qqq),
            "NQ" => Ok(Ticker::Nq),
            "NDX" => Ok(Ticker::Ndx),
            "SPY" => Ok(Ticker::Spy),
            "ES" => Ok(Ticker::Es),
            "SPX" => Ok(Ticker::Spx),
            "GLD" => Ok(Ticker::Gld),
            "GC" => Ok(Ticker::Gc),
            other => Err(AppError::UnknownTicker(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ticker::Qqq => "QQQ",
            Ticker::Nq => "NQ",
            Ticker::Ndx => "NDX",
            Ticker::Spy => "SPY",
            Ticker::Es => "ES",
            Ticker::Spx => "SPX",
            Ticker::Gld => "GLD",
            Ticker::Gc => "GC",
        }
    }

    pub fn family(&self) -> InstrumentFamily {
        match self {
            Ticker::Qqq | Ticker::Nq | Ticker::Ndx => InstrumentFamily::Nasdaq,
            Ticker::Spy | Ticker::Es | Ticker::Spx => InstrumentFamily::Sp500,
            Ticker::Gld | Ticker::Gc => InstrumentFamily::Gold,
        }
    }

    /// Dollar value of one point, defined for futures contracts only
    pub fn contract_multiplier(&self) -> Option<f64> {
        match self {
            Ticker::Nq => Some(20.0),
            Ticker::Es => Some(50.0),
            Ticker::Gc => Some(100.0),
            _ => None,
        }
    }

    /// Hardcoded default price used when the quote provider fails
    pub fn fallback_price(&self) -> f64 {
        match self {
            Ticker::Qqq => 540.0,
            Ticker::Nq => 23250.0,
            Ticker::Ndx => 23150.0,
            Ticker::Spy => 640.0,
            Ticker::Es => 6480.0,
            Ticker::Spx => 6450.0,
            Ticker::Gld => 310.0,
            Ticker::Gc => 3380.0,
        }
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Ticker {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tickers() {
        assert_eq!(Ticker::parse("qqq").unwrap(), Ticker::Qqq);
        assert_eq!(Ticker::parse("NQ").unwrap(), Ticker::Nq);
        assert_eq!(Ticker::parse("gc").unwrap(), Ticker::Gc);
    }

    #[test]
    fn test_parse_unknown_ticker_rejected() {
        assert!(matches!(
            Ticker::parse("TSLA"),
            Err(AppError::UnknownTicker(_))
        ));
    }

    #[test]
    fn test_contract_multipliers() {
        assert_eq!(Ticker::Nq.contract_multiplier(), Some(20.0));
        assert_eq!(Ticker::Es.contract_multiplier(), Some(50.0));
        assert_eq!(Ticker::Gc.contract_multiplier(), Some(100.0));
        assert_eq!(Ticker::Qqq.contract_multiplier(), None);
    }

    #[test]
    fn test_family_mapping() {
        assert_eq!(Ticker::Qqq.family(), InstrumentFamily::Nasdaq);
        assert_eq!(Ticker::Spx.family(), InstrumentFamily::Sp500);
        assert_eq!(Ticker::Gc.family(), InstrumentFamily::Gold);
    }
}
