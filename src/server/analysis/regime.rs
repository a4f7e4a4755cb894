//! Market regime analysis endpoint

use axum::extract::State;
use axum::response::{IntoResponse, Json};
use futures::future::join_all;
use serde::Serialize;

use super::AnalysisResponse;
use crate::analytics::{
    classify_regime, news_outcome_prediction, session_open_prediction, Prediction, RegimeInputs,
    RegimeSnapshot,
};
use crate::constants::{REGIME_LOOKBACK_BARS, SECTOR_ETFS, SECTOR_MOMENTUM_BARS, VIX_SYMBOL};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct RegimeResponse {
    pub regime: RegimeSnapshot,
    pub news_outcome: Prediction,
    pub session_open: Prediction,
}

/// Handler for the regime classification endpoint
///
/// Fans out the series fetches concurrently, then runs the pure classifier.
pub async fn regime_handler(State(state): State<AppState>) -> impl IntoResponse {
    let history = &state.history;
    // One extra close per series so the lookbacks yield full return windows
    let (vix, nq_closes, spy_closes) = tokio::join!(
        history.fetch_closes(VIX_SYMBOL, REGIME_LOOKBACK_BARS + 1),
        history.fetch_closes("NQ", REGIME_LOOKBACK_BARS + 1),
        history.fetch_closes("SPY", REGIME_LOOKBACK_BARS + 1),
    );

    let sector_closes = join_all(
        SECTOR_ETFS
            .iter()
            .map(|symbol| history.fetch_closes(symbol, SECTOR_MOMENTUM_BARS + 1)),
    )
    .await;
    let sectors = SECTOR_ETFS
        .iter()
        .map(|s| s.to_string())
        .zip(sector_closes)
        .collect();

    let bars_analyzed = vix.len();
    let inputs = RegimeInputs {
        vix,
        nq_closes,
        spy_closes,
        sectors,
    };

    let regime = classify_regime(&inputs);
    let response = RegimeResponse {
        news_outcome: news_outcome_prediction(&regime),
        session_open: session_open_prediction(&regime),
        regime,
    };

    Json(AnalysisResponse::new("regime", bars_analyzed, response)).into_response()
}
