use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Ticker;

/// Trigger condition for a price alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

/// A user-created price alert
///
/// Lifecycle: created by the user, flipped to `triggered` by the alert
/// sweep, removed by the user or a bulk clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: u64,
    pub ticker: Ticker,
    pub condition: AlertCondition,
    pub threshold: f64,
    pub triggered: bool,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    /// Whether the given price satisfies the alert condition
    pub fn is_hit(&self, price: f64) -> bool {
        match self.condition {
            AlertCondition::Above => price > self.threshold,
            AlertCondition::Below => price < self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(condition: AlertCondition, threshold: f64) -> PriceAlert {
        PriceAlert {
            id: 1,
            ticker: Ticker::Qqq,
            condition,
            threshold,
            triggered: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_above_condition() {
        let a = alert(AlertCondition::Above, 500.0);
        assert!(a.is_hit(500.01));
        assert!(!a.is_hit(500.0));
        assert!(!a.is_hit(499.99));
    }

    #[test]
    fn test_below_condition() {
        let a = alert(AlertCondition::Below, 500.0);
        assert!(a.is_hit(499.99));
        assert!(!a.is_hit(500.0));
    }
}
