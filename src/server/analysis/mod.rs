//! Analysis API endpoints
//!
//! Each endpoint fetches the series it needs from the history provider and
//! runs the pure analytics engine over it. Empty upstream data flows
//! through as zeroed/neutral analytics rather than an error.

pub mod orderflow;
pub mod regime;
pub mod volume_profile;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use orderflow::orderflow_handler;
pub use regime::regime_handler;
pub use volume_profile::volume_profile_handler;

/// Common analysis response envelope
#[derive(Debug, Serialize)]
pub struct AnalysisResponse<T> {
    pub analysis_type: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub generated_at: DateTime<Utc>,
    pub bars_analyzed: usize,
    pub data: T,
}

impl<T> AnalysisResponse<T> {
    pub fn new(analysis_type: &str, bars_analyzed: usize, data: T) -> Self {
        Self {
            analysis_type: analysis_type.to_string(),
            generated_at: Utc::now(),
            bars_analyzed,
            data,
        }
    }
}
