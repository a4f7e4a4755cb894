use chrono::Utc;

use crate::analytics::next_quarterly_expiration;

pub fn run() {
    let exp = next_quarterly_expiration(Utc::now());
    println!("Next quarterly expiration: {}", exp.date);
    println!("Days remaining: {}", exp.days_remaining);
}
