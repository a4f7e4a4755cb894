use crate::analytics::{convert, ConversionPolicy};
use crate::models::Ticker;
use crate::services::{QuoteClient, RatesClient};
use crate::utils::round2;

pub async fn run(value: f64, from: &str, to: &str, policy: ConversionPolicy) {
    if !value.is_finite() {
        eprintln!("value must be a finite number");
        std::process::exit(1);
    }
    let from = match Ticker::parse(from) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let to = match Ticker::parse(to) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let snapshot = QuoteClient::new().fetch_snapshot().await;
    let params = RatesClient::new().carry_params().await;
    let converted = convert(value, from, to, &snapshot, &params, policy);

    println!("{} {} = {} {}", value, from, round2(converted), to);
    println!(
        "  snapshot: {} @ {}, {} @ {}",
        from,
        snapshot.price(from),
        to,
        snapshot.price(to)
    );
    println!(
        "  carry: rate {}%, {} days to {}",
        params.risk_free_rate_pct, params.days_to_expiration, params.expiration_date
    );
}
