//! Market regime classification and heuristic direction scoring
//!
//! Combines volatility level, volatility trend, NQ/SPY return correlation,
//! and sector momentum into qualitative labels and a composite internals
//! score, then feeds the same signal set through two differently-weighted
//! scorers. These are educational heuristics, not validated models; every
//! threshold is a named constant in `constants`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CORRELATION_DIVERGENCE_MAX, REGIME_LOOKBACK_BARS, RISK_OFF_DEVIATION_PCT,
    RISK_ON_DEVIATION_PCT, SECTOR_MOMENTUM_BARS, VIX_ELEVATED_MAX, VIX_LOW_FEAR_MAX,
    VIX_NORMAL_MAX,
};
use crate::utils::{pearson_correlation, percent_change, simple_returns};

/// Fear level bucketed from the volatility index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolatilityRegime {
    LowFear,
    Normal,
    Elevated,
    HighFear,
}

/// Dealer-hedging posture implied by the volatility level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GammaRegime {
    /// Dealers long gamma, hedging dampens moves
    Positive,
    Neutral,
    /// Dealers short gamma, hedging amplifies moves
    Negative,
}

/// Risk appetite from the VIX's deviation off its trailing average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskSentiment {
    RiskOn,
    RiskOff,
    Neutral,
}

/// Five-bar momentum for one sector ETF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorMomentum {
    pub symbol: String,
    pub change_pct: f64,
}

/// Raw series handed to the classifier; callers fetch, the core computes
#[derive(Debug, Clone, Default)]
pub struct RegimeInputs {
    /// VIX-like close series, ascending
    pub vix: Vec<f64>,
    /// NQ close series, ascending
    pub nq_closes: Vec<f64>,
    /// SPY close series, ascending
    pub spy_closes: Vec<f64>,
    /// Close series per sector ETF
    pub sectors: Vec<(String, Vec<f64>)>,
}

/// Composite view of the current market regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeSnapshot {
    pub vix: f64,
    pub vix_average: f64,
    /// VIX deviation from its trailing average, percent
    pub vix_deviation_pct: f64,
    pub volatility: VolatilityRegime,
    pub gamma: GammaRegime,
    pub sentiment: RiskSentiment,
    /// Pearson correlation of NQ/SPY daily returns over the trailing window
    pub nq_spy_correlation: f64,
    pub strongest_sector: Option<SectorMomentum>,
    pub weakest_sector: Option<SectorMomentum>,
    /// Sum of the weighted signal contributions
    pub internals_score: i32,
}

/// Directional call produced by the scorers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "STRONG BULLISH")]
    StrongBullish,
    #[serde(rename = "BULLISH")]
    Bullish,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "BEARISH")]
    Bearish,
    #[serde(rename = "STRONG BEARISH")]
    StrongBearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Labeled direction with a confidence tier and a suggested playbook line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub direction: Direction,
    pub confidence: Confidence,
    pub score: i32,
    pub strategy: String,
}

/// Classify the current regime from raw series
///
/// Empty or short series degrade gracefully: a missing VIX reads as a flat
/// zero deviation, a missing sector list simply yields no strongest/weakest
/// entries. Never fails.
pub fn classify_regime(inputs: &RegimeInputs) -> RegimeSnapshot {
    let vix = inputs.vix.last().copied().unwrap_or(0.0);
    let lookback_start = inputs.vix.len().saturating_sub(REGIME_LOOKBACK_BARS);
    let vix_window = &inputs.vix[lookback_start..];
    let vix_average = if vix_window.is_empty() {
        vix
    } else {
        vix_window.iter().sum::<f64>() / vix_window.len() as f64
    };
    let vix_deviation_pct = percent_change(vix, vix_average);

    // A missing VIX series must not read as a 0.0 print: zero would land in
    // the low-fear bucket and tilt every downstream score bullish on no
    // data. No data classifies as Normal/Neutral across the board.
    let volatility = if inputs.vix.is_empty() {
        VolatilityRegime::Normal
    } else if vix < VIX_LOW_FEAR_MAX {
        VolatilityRegime::LowFear
    } else if vix < VIX_NORMAL_MAX {
        VolatilityRegime::Normal
    } else if vix < VIX_ELEVATED_MAX {
        VolatilityRegime::Elevated
    } else {
        VolatilityRegime::HighFear
    };

    let gamma = match volatility {
        VolatilityRegime::LowFear => GammaRegime::Positive,
        VolatilityRegime::Normal => GammaRegime::Neutral,
        VolatilityRegime::Elevated | VolatilityRegime::HighFear => GammaRegime::Negative,
    };

    let sentiment = if vix_deviation_pct <= RISK_ON_DEVIATION_PCT {
        RiskSentiment::RiskOn
    } else if vix_deviation_pct >= RISK_OFF_DEVIATION_PCT {
        RiskSentiment::RiskOff
    } else {
        RiskSentiment::Neutral
    };

    let nq_spy_correlation = trailing_return_correlation(&inputs.nq_closes, &inputs.spy_closes);

    let momentum: Vec<SectorMomentum> = inputs
        .sectors
        .iter()
        .filter_map(|(symbol, closes)| {
            sector_momentum(closes).map(|change_pct| SectorMomentum {
                symbol: symbol.clone(),
                change_pct,
            })
        })
        .collect();
    let strongest_sector = momentum
        .iter()
        .max_by(|a, b| a.change_pct.total_cmp(&b.change_pct))
        .cloned();
    let weakest_sector = momentum
        .iter()
        .min_by(|a, b| a.change_pct.total_cmp(&b.change_pct))
        .cloned();

    let internals_score = internals_score(
        volatility,
        sentiment,
        nq_spy_correlation,
        strongest_sector.as_ref(),
        weakest_sector.as_ref(),
    );

    RegimeSnapshot {
        vix,
        vix_average,
        vix_deviation_pct,
        volatility,
        gamma,
        sentiment,
        nq_spy_correlation,
        strongest_sector,
        weakest_sector,
        internals_score,
    }
}

fn trailing_return_correlation(nq_closes: &[f64], spy_closes: &[f64]) -> f64 {
    let take = |closes: &[f64]| -> Vec<f64> {
        // One extra close so the lookback yields the full number of returns
        let start = closes.len().saturating_sub(REGIME_LOOKBACK_BARS + 1);
        simple_returns(&closes[start..])
    };
    pearson_correlation(&take(nq_closes), &take(spy_closes))
}

fn sector_momentum(closes: &[f64]) -> Option<f64> {
    if closes.len() < SECTOR_MOMENTUM_BARS + 1 {
        return None;
    }
    let current = *closes.last()?;
    let base = closes[closes.len() - 1 - SECTOR_MOMENTUM_BARS];
    Some(percent_change(current, base))
}

/// Weighted +1 / -1 / -2 contributions per signal
fn internals_score(
    volatility: VolatilityRegime,
    sentiment: RiskSentiment,
    correlation: f64,
    strongest: Option<&SectorMomentum>,
    weakest: Option<&SectorMomentum>,
) -> i32 {
    let mut score = 0;

    score += match volatility {
        VolatilityRegime::LowFear => 1,
        VolatilityRegime::Normal => 0,
        VolatilityRegime::Elevated => -1,
        VolatilityRegime::HighFear => -2,
    };

    score += match sentiment {
        RiskSentiment::RiskOn => 1,
        RiskSentiment::RiskOff => -1,
        RiskSentiment::Neutral => 0,
    };

    // Divergent index/mega-cap tape reads as distribution
    if correlation != 0.0 {
        score += if correlation < CORRELATION_DIVERGENCE_MAX { -1 } else { 1 };
    }

    if let Some(s) = strongest {
        if s.change_pct > 0.0 {
            score += 1;
        }
    }
    if let Some(w) = weakest {
        if w.change_pct < -2.0 {
            score -= 1;
        }
    }

    score
}

/// News-outcome scorer: volatility posture dominates, since a print into a
/// short-gamma tape moves further than the same print into a pinned one
pub fn news_outcome_prediction(regime: &RegimeSnapshot) -> Prediction {
    let mut score = regime.internals_score;

    score += match regime.sentiment {
        RiskSentiment::RiskOn => 2,
        RiskSentiment::RiskOff => -2,
        RiskSentiment::Neutral => 0,
    };
    score += match regime.gamma {
        GammaRegime::Positive => 1,
        GammaRegime::Neutral => 0,
        GammaRegime::Negative => -1,
    };

    let direction = direction_from_score(score);
    Prediction {
        direction,
        confidence: confidence_from_score(score),
        score,
        strategy: news_strategy(direction, regime.gamma).to_string(),
    }
}

/// Session-open scorer: leans on sector rotation and the correlation of the
/// overnight leaders with the broad tape
pub fn session_open_prediction(regime: &RegimeSnapshot) -> Prediction {
    let mut score = regime.internals_score;

    if let Some(s) = &regime.strongest_sector {
        if s.change_pct > 1.0 {
            score += 2;
        } else if s.change_pct > 0.0 {
            score += 1;
        }
    }
    if let Some(w) = &regime.weakest_sector {
        if w.change_pct < -1.0 {
            score -= 1;
        }
    }
    if regime.nq_spy_correlation != 0.0 && regime.nq_spy_correlation < CORRELATION_DIVERGENCE_MAX {
        score -= 1;
    }

    let direction = direction_from_score(score);
    Prediction {
        direction,
        confidence: confidence_from_score(score),
        score,
        strategy: open_strategy(direction).to_string(),
    }
}

fn direction_from_score(score: i32) -> Direction {
    match score {
        s if s >= 4 => Direction::StrongBullish,
        s if s >= 2 => Direction::Bullish,
        s if s <= -4 => Direction::StrongBearish,
        s if s <= -2 => Direction::Bearish,
        _ => Direction::Neutral,
    }
}

fn confidence_from_score(score: i32) -> Confidence {
    match score.abs() {
        a if a >= 5 => Confidence::High,
        a if a >= 3 => Confidence::Medium,
        _ => Confidence::Low,
    }
}

fn news_strategy(direction: Direction, gamma: GammaRegime) -> &'static str {
    match (direction, gamma) {
        (Direction::StrongBullish, _) => "Buy the initial dip on the print; hold through the first pullback",
        (Direction::Bullish, GammaRegime::Positive) => "Fade moves back to VWAP; pinned tape favors mean reversion",
        (Direction::Bullish, _) => "Buy confirmation above the pre-news high",
        (Direction::Neutral, _) => "Stand aside until the post-print range resolves",
        (Direction::Bearish, GammaRegime::Negative) => "Sell rips; short-gamma hedging extends the move",
        (Direction::Bearish, _) => "Sell breakdown below the pre-news low",
        (Direction::StrongBearish, _) => "Sell the first bounce; do not fade the move",
    }
}

fn open_strategy(direction: Direction) -> &'static str {
    match direction {
        Direction::StrongBullish => "Buy the opening drive; trail under the first 5-bar low",
        Direction::Bullish => "Buy pullbacks to VWAP while breadth holds",
        Direction::Neutral => "Trade the opening range breakout in either direction",
        Direction::Bearish => "Sell bounces into VWAP while leaders lag",
        Direction::StrongBearish => "Sell the opening bounce; cover into capitulation volume",
    }
}
