//! Volume profile analysis endpoint

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::AnalysisResponse;
use crate::analytics::{profile_for_window, ProfileWindow, VolumeProfile};
use crate::constants::PROFILE_MONTHLY_BARS;
use crate::server::AppState;

/// Query parameters for volume profile analysis
#[derive(Debug, Deserialize)]
pub struct VolumeProfileQuery {
    /// Symbol to analyze (required)
    pub symbol: String,

    /// Analysis window (default: all three)
    pub window: Option<ProfileWindow>,
}

#[derive(Debug, Serialize)]
pub struct VolumeProfileResponse {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<VolumeProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<VolumeProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<VolumeProfile>,
}

/// Handler for the volume profile endpoint
///
/// One fetch covers the longest horizon; each profile slices its own
/// trailing window from the same bar series.
pub async fn volume_profile_handler(
    State(state): State<AppState>,
    Query(params): Query<VolumeProfileQuery>,
) -> impl IntoResponse {
    if params.symbol.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "symbol parameter is required" })),
        )
            .into_response();
    }

    let bars = state
        .history
        .fetch_bars(&params.symbol, PROFILE_MONTHLY_BARS)
        .await;

    let wanted = |w: ProfileWindow| params.window.is_none() || params.window == Some(w);
    let response = VolumeProfileResponse {
        symbol: params.symbol.clone(),
        daily: wanted(ProfileWindow::Daily).then(|| profile_for_window(&bars, ProfileWindow::Daily)),
        weekly: wanted(ProfileWindow::Weekly)
            .then(|| profile_for_window(&bars, ProfileWindow::Weekly)),
        monthly: wanted(ProfileWindow::Monthly)
            .then(|| profile_for_window(&bars, ProfileWindow::Monthly)),
    };

    Json(AnalysisResponse::new("volume_profile", bars.len(), response)).into_response()
}
