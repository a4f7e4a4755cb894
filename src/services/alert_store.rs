//! Persisted price alert store
//!
//! A JSON file holding the alert list: loaded once on startup, rewritten on
//! every mutation. The store is an explicit state object shared behind a
//! lock; handlers never touch the file directly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{AlertCondition, PriceAlert, PriceSnapshot, Ticker};

pub type SharedAlertStore = Arc<RwLock<AlertStore>>;

pub struct AlertStore {
    path: PathBuf,
    alerts: Vec<PriceAlert>,
    next_id: u64,
}

impl AlertStore {
    /// Load existing alerts from disk; a missing file is an empty store
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let alerts: Vec<PriceAlert> = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| AppError::Storage(format!("corrupt alert file: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        let next_id = alerts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        info!(count = alerts.len(), path = %path.display(), "alert store loaded");
        Ok(Self {
            path,
            alerts,
            next_id,
        })
    }

    pub fn alerts(&self) -> &[PriceAlert] {
        &self.alerts
    }

    pub fn create(
        &mut self,
        ticker: Ticker,
        condition: AlertCondition,
        threshold: f64,
    ) -> Result<PriceAlert> {
        let alert = PriceAlert {
            id: self.next_id,
            ticker,
            condition,
            threshold,
            triggered: false,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.alerts.push(alert.clone());
        self.persist()?;
        Ok(alert)
    }

    /// Remove one alert by id; Ok(false) when no such alert exists
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        if self.alerts.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.alerts.len();
        self.alerts.clear();
        self.persist()?;
        Ok(removed)
    }

    /// Sweep untriggered alerts against a snapshot, flipping any that hit
    ///
    /// Returns the ids that fired this sweep. Persists only when something
    /// changed.
    pub fn check_against(&mut self, snapshot: &PriceSnapshot) -> Result<Vec<u64>> {
        let mut fired = Vec::new();
        for alert in &mut self.alerts {
            if !alert.triggered && alert.is_hit(snapshot.price(alert.ticker)) {
                alert.triggered = true;
                fired.push(alert.id);
            }
        }
        if !fired.is_empty() {
            self.persist()?;
        }
        Ok(fired)
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.alerts)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
