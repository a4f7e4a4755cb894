pub mod alert_store;
pub mod history;
pub mod quotes;
pub mod rates;

pub use alert_store::{AlertStore, SharedAlertStore};
pub use history::HistoryClient;
pub use quotes::QuoteClient;
pub use rates::RatesClient;
