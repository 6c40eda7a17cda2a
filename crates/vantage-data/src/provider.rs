//! The price-history provider interface.

use crate::{error::Result, series::PriceSeries};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Source of daily closing prices.
///
/// Implementations return an empty [`PriceSeries`] (not an error) when the
/// symbol is unknown or has no data in the window. Errors are reserved for
/// failures of the provider itself.
pub trait PriceProvider {
    /// Fetch the daily price history of `symbol` for `lookback`, ending at the
    /// provider's most recent date.
    fn fetch_price_history(
        &self,
        symbol: &str,
        lookback: Duration,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;
}

/// Configuration for data fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// History window in years (default: 2).
    pub lookback_years: u32,
    /// Quote column used as the closing price (default: "adjusted_close").
    pub price_column: String,
    /// Pause between remote requests in milliseconds (default: 1000).
    pub request_delay_ms: u64,
    /// Requests in flight at once (default: 1, so the delay spaces out
    /// every request).
    pub max_concurrent_requests: usize,
}

impl FetchConfig {
    /// Lookback window as a duration.
    pub fn lookback(&self) -> Duration {
        Duration::days(i64::from(self.lookback_years) * 365)
    }

    /// Pause between remote requests.
    pub const fn request_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_delay_ms)
    }

    /// Requests in flight at once, never below one.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_requests.max(1)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            lookback_years: 2,
            price_column: "adjusted_close".to_string(),
            request_delay_ms: 1000,
            max_concurrent_requests: 1,
        }
    }
}
