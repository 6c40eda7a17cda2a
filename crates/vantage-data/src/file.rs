//! Offline price histories stored as CSV files.
//!
//! Each symbol lives in `<dir>/<SYMBOL>.csv` with a `date,close` header and
//! ISO-8601 dates. Row order does not matter.

use crate::{
    error::Result,
    memory::window,
    provider::PriceProvider,
    series::PriceSeries,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One row of a price file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

/// Provider reading `<SYMBOL>.csv` files from a directory.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    dir: PathBuf,
}

impl CsvPriceProvider {
    /// Create a provider rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `symbol`.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }

    /// Read every row of a price file into a series.
    ///
    /// # Errors
    ///
    /// Fails on IO errors, malformed rows, or rows violating the series
    /// invariants.
    pub fn read_file(symbol: &str, path: &Path) -> Result<PriceSeries> {
        let mut reader = csv::Reader::from_path(path)?;
        let records = reader
            .deserialize::<PriceRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        PriceSeries::from_points(symbol, records.into_iter().map(|r| (r.date, r.close)))
    }

    /// Write a series as a price file.
    pub fn write_file(series: &PriceSeries, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for (date, close) in series.iter() {
            writer.serialize(PriceRecord { date, close })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl PriceProvider for CsvPriceProvider {
    async fn fetch_price_history(&self, symbol: &str, lookback: Duration) -> Result<PriceSeries> {
        let path = self.path_for(symbol);
        if !path.is_file() {
            tracing::warn!(%symbol, path = %path.display(), "no price file");
            return Ok(PriceSeries::empty(symbol));
        }

        let series = Self::read_file(symbol, &path)?;
        tracing::debug!(%symbol, rows = series.len(), "loaded price file");
        Ok(window(&series, lookback))
    }
}
