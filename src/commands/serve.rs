use std::sync::Arc;

use tokio::sync::RwLock;

use crate::constants::ALERT_STORE_FILE;
use crate::server::{self, AppState};
use crate::services::{AlertStore, HistoryClient, QuoteClient, RatesClient};

pub async fn run(port: u16) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let alert_path = std::env::var("MARKETLENS_ALERT_FILE")
        .unwrap_or_else(|_| ALERT_STORE_FILE.to_string());
    let alerts = match AlertStore::load(&alert_path) {
        Ok(store) => Arc::new(RwLock::new(store)),
        Err(e) => {
            eprintln!("Failed to load alert store from {alert_path}: {e}");
            std::process::exit(1);
        }
    };

    let state = AppState {
        quotes: Arc::new(QuoteClient::new()),
        rates: Arc::new(RatesClient::new()),
        history: Arc::new(HistoryClient::new()),
        alerts,
    };

    if let Err(e) = server::serve(state, port).await {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
