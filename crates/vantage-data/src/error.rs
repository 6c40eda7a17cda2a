//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
///
/// An empty price history is not an error: providers report it as an empty
/// [`PriceSeries`](crate::PriceSeries). These variants cover transport
/// failures and structurally invalid input.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// A required column is absent from a price frame
    #[error("Missing column '{column}' in price data for {symbol}")]
    MissingColumn {
        /// Symbol the frame belongs to
        symbol: String,
        /// Name of the absent column
        column: String,
    },

    /// Series violates the ordering or value invariants
    #[error("Invalid price series for {symbol}: {reason}")]
    InvalidSeries {
        /// Symbol the series belongs to
        symbol: String,
        /// What was wrong with it
        reason: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Time conversion error
    #[error("Time conversion error: {0}")]
    TimeConversion(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether the error means "no data for this symbol" rather than a failure
    /// of the provider itself.
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::YahooApi(_) | Self::MissingData { .. } | Self::InvalidSymbol(_)
        )
    }
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        Self::YahooApi(err.to_string())
    }
}
