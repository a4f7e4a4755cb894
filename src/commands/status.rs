use crate::constants::ALERT_STORE_FILE;
use crate::models::Ticker;
use crate::services::{AlertStore, QuoteClient};

pub async fn run() {
    let snapshot = QuoteClient::new().fetch_snapshot().await;

    println!("Snapshot @ {}", snapshot.time.to_rfc3339());
    for ticker in Ticker::ALL {
        println!("  {:<4} {:>12.2}", ticker.as_str(), snapshot.price(ticker));
    }

    let alert_path =
        std::env::var("MARKETLENS_ALERT_FILE").unwrap_or_else(|_| ALERT_STORE_FILE.to_string());
    match AlertStore::load(&alert_path) {
        Ok(store) => {
            let triggered = store.alerts().iter().filter(|a| a.triggered).count();
            println!(
                "Alerts: {} total, {} triggered ({})",
                store.alerts().len(),
                triggered,
                alert_path
            );
        }
        Err(e) => println!("Alerts: unavailable ({e})"),
    }
}
