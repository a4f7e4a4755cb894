//! Order-flow analysis endpoint

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::AnalysisResponse;
use crate::analytics::{
    block_trades, cumulative_volume_delta, order_flow_imbalance, vwap_bands, BlockTradeSummary,
    OrderFlowImbalance, VolumeDelta, VwapBands,
};
use crate::server::AppState;

/// Query parameters for order-flow analysis
#[derive(Debug, Deserialize)]
pub struct OrderFlowQuery {
    /// Symbol to analyze (required)
    pub symbol: String,

    /// Number of trailing bars to fetch (default: 30, range: 2-500)
    pub lookback: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct OrderFlowResponse {
    pub symbol: String,
    pub vwap: VwapBands,
    pub volume_delta: VolumeDelta,
    pub imbalance: OrderFlowImbalance,
    pub block_trades: BlockTradeSummary,
}

/// Handler for the order-flow analysis endpoint
pub async fn orderflow_handler(
    State(state): State<AppState>,
    Query(params): Query<OrderFlowQuery>,
) -> impl IntoResponse {
    if params.symbol.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "symbol parameter is required" })),
        )
            .into_response();
    }

    let lookback = params.lookback.unwrap_or(30).clamp(2, 500);
    let bars = state.history.fetch_bars(&params.symbol, lookback).await;

    let response = OrderFlowResponse {
        symbol: params.symbol.clone(),
        vwap: vwap_bands(&bars),
        volume_delta: cumulative_volume_delta(&bars),
        imbalance: order_flow_imbalance(&bars),
        block_trades: block_trades(&bars),
    };

    Json(AnalysisResponse::new("orderflow", bars.len(), response)).into_response()
}
