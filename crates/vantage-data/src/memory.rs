//! In-memory price provider.

use crate::{error::Result, provider::PriceProvider, series::PriceSeries};
use chrono::Duration;
use std::collections::HashMap;

/// Provider serving pre-loaded series.
///
/// The lookback window is anchored at each series' last date, so fixtures
/// don't go stale.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceProvider {
    series: HashMap<String, PriceSeries>,
}

impl StaticPriceProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a series under its own symbol.
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    /// Register a series under its own symbol, replacing any previous one.
    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol().to_string(), series);
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no symbol is registered.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Trim `series` to the `lookback` window ending at its last date.
pub(crate) fn window(series: &PriceSeries, lookback: Duration) -> PriceSeries {
    let Some((_, last)) = series.date_range() else {
        return series.clone();
    };
    let cutoff = last - lookback;
    let dates: Vec<_> = series
        .dates()
        .iter()
        .copied()
        .filter(|date| *date >= cutoff)
        .collect();
    series.restrict_to(&dates)
}

impl PriceProvider for StaticPriceProvider {
    async fn fetch_price_history(&self, symbol: &str, lookback: Duration) -> Result<PriceSeries> {
        Ok(self.series.get(symbol).map_or_else(
            || {
                tracing::warn!(%symbol, "symbol not registered");
                PriceSeries::empty(symbol)
            },
            |series| window(series, lookback),
        ))
    }
}
