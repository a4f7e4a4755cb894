//! Cost-of-carry pricing and quarterly expiration arithmetic

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::DAYS_PER_YEAR;

/// Carry multiplier `exp((r - d) * t)` with `t = days / 365`
///
/// Factored out of `carry_price` so converters can apply the exact same
/// multiplier in both directions, guaranteeing round-trip identity up to
/// floating-point epsilon.
pub fn carry_multiplier(rate_pct: f64, div_yield_pct: f64, days_to_exp: u32) -> f64 {
    let r = rate_pct / 100.0;
    let d = div_yield_pct / 100.0;
    let t = days_to_exp as f64 / DAYS_PER_YEAR;
    ((r - d) * t).exp()
}

/// Theoretical futures price from spot via cost of carry
///
/// Full floating-point precision; rounding is the consumer's job.
pub fn carry_price(spot: f64, rate_pct: f64, div_yield_pct: f64, days_to_exp: u32) -> f64 {
    spot * carry_multiplier(rate_pct, div_yield_pct, days_to_exp)
}

/// Next quarterly options/futures expiration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyExpiration {
    pub date: NaiveDate,
    /// Calendar days until the expiration, never less than 1
    pub days_remaining: i64,
}

/// Third Friday of the next quarterly month (Mar/Jun/Sep/Dec)
///
/// The month scan uses a strictly-greater comparison: called inside an
/// expiration month this rolls to the NEXT quarter, it never returns the
/// current month. The third Friday is found by explicit calendar stepping
/// (scan days 1..=7 for the first Friday, then add 14 days) rather than
/// weekday-offset arithmetic.
pub fn next_quarterly_expiration(now: DateTime<Utc>) -> QuarterlyExpiration {
    const QUARTERLY_MONTHS: [u32; 4] = [3, 6, 9, 12];

    let current_month = now.month();
    let (target_year, target_month) = QUARTERLY_MONTHS
        .iter()
        .find(|&&m| m > current_month)
        .map(|&m| (now.year(), m))
        .unwrap_or((now.year() + 1, 3));

    let date = third_friday(target_year, target_month);

    // Ceiling of the remaining time in days, floored at 1 so the carry
    // multiplier never degenerates on expiration day.
    let target_midnight = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc();
    let remaining_secs = (target_midnight - now).num_seconds();
    let days_remaining = ((remaining_secs as f64) / 86_400.0).ceil().max(1.0) as i64;

    QuarterlyExpiration {
        date,
        days_remaining,
    }
}

fn third_friday(year: i32, month: u32) -> NaiveDate {
    let first_friday = (1..=7)
        .map(|day| NaiveDate::from_ymd_opt(year, month, day).expect("days 1-7 always exist"))
        .find(|d| d.weekday() == Weekday::Fri)
        .expect("every month contains a Friday in its first week");
    first_friday + chrono::Duration::days(14)
}
