use crate::analytics::premium_info;
use crate::models::Ticker;
use crate::services::{QuoteClient, RatesClient};

pub async fn run(instrument: &str) {
    let future = match Ticker::parse(instrument) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let spot_ticker = match future {
        Ticker::Nq => Ticker::Ndx,
        Ticker::Es => Ticker::Spx,
        Ticker::Gc => Ticker::Gld,
        _ => {
            eprintln!("instrument must be a future: NQ, ES, or GC");
            std::process::exit(1);
        }
    };

    let snapshot = QuoteClient::new().fetch_snapshot().await;
    let params = RatesClient::new().carry_params().await;

    let spot = snapshot.price(spot_ticker);
    let actual = snapshot.price(future);
    let Some(info) = premium_info(spot, actual, future, &params) else {
        eprintln!("instrument must be a future: NQ, ES, or GC");
        std::process::exit(1);
    };

    println!("{} premium vs {}", future, spot_ticker);
    println!("  theoretical: {}", info.theoretical);
    println!("  actual:      {}", info.actual);
    println!("  points:      {}", info.points);
    println!("  percent:     {}%", info.percent);
    println!("  dollars:     ${} per contract", info.dollars);
    println!(
        "  ({} days to {})",
        params.days_to_expiration, params.expiration_date
    );
}
