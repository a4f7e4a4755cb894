pub mod analysis;
pub mod api;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::services::{HistoryClient, QuoteClient, RatesClient, SharedAlertStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<QuoteClient>,
    pub rates: Arc<RatesClient>,
    pub history: Arc<HistoryClient>,
    pub alerts: SharedAlertStore,
}

/// Start the axum server
pub async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting marketlens server");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
        ])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /convert?value=100&from=NDX&to=NQ&policy=live-ratio");
    tracing::info!("  GET  /convert/beta?value=6500&from=ES&to=NQ");
    tracing::info!("  GET  /premium?instrument=NQ");
    tracing::info!("  GET  /expiration");
    tracing::info!("  GET  /analysis/orderflow?symbol=NQ&lookback=30");
    tracing::info!("  GET  /analysis/volume-profile?symbol=NQ&window=weekly");
    tracing::info!("  GET  /analysis/regime");
    tracing::info!("  GET/POST/DELETE /alerts, POST /alerts/check");

    let app = Router::new()
        .route("/health", get(api::health_handler))
        .route("/convert", get(api::convert_handler))
        .route("/convert/beta", get(api::convert_beta_handler))
        .route("/premium", get(api::premium_handler))
        .route("/expiration", get(api::expiration_handler))
        .route("/analysis/orderflow", get(analysis::orderflow_handler))
        .route(
            "/analysis/volume-profile",
            get(analysis::volume_profile_handler),
        )
        .route("/analysis/regime", get(analysis::regime_handler))
        .route("/alerts", get(api::list_alerts_handler))
        .route("/alerts", post(api::create_alert_handler))
        .route("/alerts", delete(api::clear_alerts_handler))
        .route("/alerts/{id}", delete(api::remove_alert_handler))
        .route("/alerts/check", post(api::check_alerts_handler))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
