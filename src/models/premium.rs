use serde::{Deserialize, Serialize};

/// Theoretical-vs-actual futures premium for one underlying/future pair
///
/// All fields are rounded once at construction: 2 decimals for price and
/// dollar magnitudes, 4 for the percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumInfo {
    /// Fair futures value from the carry formula, rounded to 2 decimals
    pub theoretical: f64,

    /// Last traded futures price, rounded to 2 decimals
    pub actual: f64,

    /// Premium in index points, rounded to 2 decimals
    pub points: f64,

    /// Premium as a percent of spot, rounded to 4 decimals
    pub percent: f64,

    /// Premium in dollars per contract, rounded to 2 decimals
    pub dollars: f64,
}
