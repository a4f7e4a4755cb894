//! Pricing surface and alert endpoints
//!
//! Handlers validate raw inputs at the boundary (unknown tickers, NaN
//! values) and hand plain data to the pure core. Nothing past this layer
//! returns an error for an unsupported pair; the converter falls back to
//! identity instead.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::{
    convert, convert_beta, next_quarterly_expiration, premium_info, ConversionPolicy,
};
use crate::models::{AlertCondition, Ticker};
use crate::server::AppState;
use crate::utils::round2;

fn bad_request(message: impl Into<String>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let alert_count = state.alerts.read().await.alerts().len();
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339(),
        "alerts": alert_count,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub value: f64,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub policy: ConversionPolicy,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub value: f64,
    pub from: Ticker,
    pub to: Ticker,
    pub converted: f64,
    pub policy: ConversionPolicy,
    pub snapshot_time: i64,
}

/// GET /convert - convert a value between two instruments
pub async fn convert_handler(
    State(state): State<AppState>,
    Query(params): Query<ConvertQuery>,
) -> impl IntoResponse {
    // NaN never reaches the core by contract
    if !params.value.is_finite() {
        return bad_request("value must be a finite number");
    }
    let from = match Ticker::parse(&params.from) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };
    let to = match Ticker::parse(&params.to) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };

    let snapshot = state.quotes.fetch_snapshot().await;
    let carry = state.rates.carry_params().await;
    let converted = convert(params.value, from, to, &snapshot, &carry, params.policy);

    Json(ConvertResponse {
        value: params.value,
        from,
        to,
        converted: round2(converted),
        policy: params.policy,
        snapshot_time: snapshot.time.timestamp(),
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct ConvertBetaQuery {
    pub value: f64,
    pub from: String,
    pub to: String,
}

/// GET /convert/beta - experimental single-ratio index conversion
pub async fn convert_beta_handler(
    State(state): State<AppState>,
    Query(params): Query<ConvertBetaQuery>,
) -> impl IntoResponse {
    if !params.value.is_finite() {
        return bad_request("value must be a finite number");
    }
    let from = match Ticker::parse(&params.from) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };
    let to = match Ticker::parse(&params.to) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };

    let snapshot = state.quotes.fetch_snapshot().await;
    match convert_beta(params.value, from, to, &snapshot) {
        Some(converted) => Json(serde_json::json!({
            "value": params.value,
            "from": from,
            "to": to,
            "converted": round2(converted),
            "note": "beta: single NDX/SPX ratio, ignores carry premiums",
        }))
        .into_response(),
        None => bad_request("beta conversion supports ES, NQ, SPX, NDX only"),
    }
}

#[derive(Debug, Deserialize)]
pub struct PremiumQuery {
    pub instrument: String,
}

/// GET /premium - theoretical vs actual futures premium
pub async fn premium_handler(
    State(state): State<AppState>,
    Query(params): Query<PremiumQuery>,
) -> impl IntoResponse {
    let future = match Ticker::parse(&params.instrument) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };

    let snapshot = state.quotes.fetch_snapshot().await;
    let carry = state.rates.carry_params().await;

    // Spot leg is the future's cash index, or the ETF proxy for gold
    let spot_ticker = match future {
        Ticker::Nq => Ticker::Ndx,
        Ticker::Es => Ticker::Spx,
        Ticker::Gc => Ticker::Gld,
        _ => return bad_request("instrument must be a future: NQ, ES, or GC"),
    };

    let spot = snapshot.price(spot_ticker);
    let actual = snapshot.price(future);
    match premium_info(spot, actual, future, &carry) {
        Some(info) => Json(serde_json::json!({
            "instrument": future,
            "underlying": spot_ticker,
            "days_to_expiration": carry.days_to_expiration,
            "premium": info,
        }))
        .into_response(),
        None => bad_request("instrument must be a future: NQ, ES, or GC"),
    }
}

/// GET /expiration - next quarterly expiration
pub async fn expiration_handler() -> impl IntoResponse {
    Json(next_quarterly_expiration(Utc::now()))
}

/// GET /alerts
pub async fn list_alerts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.alerts.read().await;
    Json(store.alerts().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub ticker: String,
    pub condition: AlertCondition,
    pub threshold: f64,
}

/// POST /alerts
pub async fn create_alert_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> impl IntoResponse {
    if !req.threshold.is_finite() || req.threshold <= 0.0 {
        return bad_request("threshold must be a positive number");
    }
    let ticker = match Ticker::parse(&req.ticker) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut store = state.alerts.write().await;
    match store.create(ticker, req.condition, req.threshold) {
        Ok(alert) => {
            info!(id = alert.id, %ticker, "alert created");
            (StatusCode::CREATED, Json(alert)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /alerts/{id}
pub async fn remove_alert_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let mut store = state.alerts.write().await;
    match store.remove(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("no alert with id {id}") })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /alerts - bulk clear
pub async fn clear_alerts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut store = state.alerts.write().await;
    match store.clear() {
        Ok(removed) => Json(serde_json::json!({ "removed": removed })).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /alerts/check - sweep alerts against a fresh snapshot
pub async fn check_alerts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.quotes.fetch_snapshot().await;
    let mut store = state.alerts.write().await;
    match store.check_against(&snapshot) {
        Ok(fired) => Json(serde_json::json!({
            "fired": fired,
            "snapshot_time": snapshot.time.timestamp(),
        }))
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
