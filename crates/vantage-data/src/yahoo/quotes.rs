//! Daily price history from Yahoo Finance.

use crate::{
    error::{DataError, Result},
    provider::{FetchConfig, PriceProvider},
    series::PriceSeries,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use polars::prelude::*;
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance price provider with rate limiting.
pub struct YahooPriceProvider {
    connector: yahoo::YahooConnector,
    rate_limit_delay: Duration,
    price_column: String,
}

impl std::fmt::Debug for YahooPriceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooPriceProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .field("price_column", &self.price_column)
            .finish_non_exhaustive()
    }
}

impl YahooPriceProvider {
    /// Create a provider with default rate limiting (1 req/sec).
    pub fn new() -> Result<Self> {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a provider reading `config.price_column` and pausing
    /// `config.request_delay()` between requests.
    pub fn with_config(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            connector: yahoo::YahooConnector::new()?,
            rate_limit_delay: config.request_delay(),
            price_column: config.price_column.clone(),
        })
    }

    /// Fetch daily quotes for a single symbol.
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, close, adjusted_close
    pub async fn fetch_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await;

        // Rate limit regardless of the outcome so failures don't burst.
        sleep(self.rate_limit_delay).await;

        let quotes = response?
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp as i64).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let adj_closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("close".into(), closes).into(),
            Series::new("adjusted_close".into(), adj_closes).into(),
        ])?;

        let df = df
            .lazy()
            .with_columns([
                lit(symbol).alias("symbol"),
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            ])
            .select([
                col("symbol"),
                col("date"),
                col("close"),
                col("adjusted_close"),
            ])
            .collect()?;

        Ok(df)
    }
}

impl PriceProvider for YahooPriceProvider {
    async fn fetch_price_history(
        &self,
        symbol: &str,
        lookback: ChronoDuration,
    ) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = end - lookback;

        match self.fetch_quotes(symbol, start, end).await {
            Ok(frame) => PriceSeries::from_frame(symbol, &frame, &self.price_column),
            Err(e) if e.is_unavailable() => {
                tracing::warn!(%symbol, error = %e, "no price history available");
                Ok(PriceSeries::empty(symbol))
            }
            Err(e) => Err(e),
        }
    }
}
