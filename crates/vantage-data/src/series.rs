//! Daily price series.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// An immutable daily price history for one symbol.
///
/// Dates are strictly increasing. Missing trading days are simply absent.
/// A series may be empty, which is how providers report a symbol without
/// data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl PriceSeries {
    /// Create a series of closing prices.
    ///
    /// Prices must be positive and finite, dates strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSeries`] if an invariant is violated.
    pub fn new(symbol: impl Into<String>, dates: Vec<NaiveDate>, prices: Vec<f64>) -> Result<Self> {
        let series = Self::derived(symbol, dates, prices)?;

        if let Some((date, price)) = series.iter().find(|(_, p)| *p <= 0.0) {
            return Err(series.invalid(format!("non-positive price {price} on {date}")));
        }

        Ok(series)
    }

    /// Create a series of derived values (normalized prices, index levels).
    ///
    /// Unlike [`PriceSeries::new`], values only need to be finite: a zero
    /// weight legitimately produces a zero level.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidSeries`] on length mismatch, unordered
    /// dates or non-finite values.
    pub fn derived(
        symbol: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let series = Self {
            symbol: symbol.into(),
            dates,
            values,
        };

        if series.dates.len() != series.values.len() {
            return Err(series.invalid(format!(
                "{} dates vs {} values",
                series.dates.len(),
                series.values.len()
            )));
        }

        if let Some(pair) = series.dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(series.invalid(format!(
                "dates not strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }

        if let Some((date, value)) = series.iter().find(|(_, v)| !v.is_finite()) {
            return Err(series.invalid(format!("non-finite value {value} on {date}")));
        }

        Ok(series)
    }

    /// Create a series from unordered (date, price) points.
    ///
    /// Points are sorted by date; duplicate dates are rejected.
    pub fn from_points(
        symbol: impl Into<String>,
        points: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self> {
        let mut points: Vec<(NaiveDate, f64)> = points.into_iter().collect();
        points.sort_by_key(|(date, _)| *date);
        let (dates, prices) = points.into_iter().unzip();
        Self::new(symbol, dates, prices)
    }

    /// Extract a series from a quote frame with a `date` column and a price
    /// column.
    ///
    /// # Errors
    ///
    /// Fails fast with [`DataError::MissingColumn`] when either column is
    /// absent and [`DataError::InvalidSeries`] on nulls or bad values.
    pub fn from_frame(symbol: impl Into<String>, frame: &DataFrame, column: &str) -> Result<Self> {
        let symbol = symbol.into();
        let missing = |name: &str| DataError::MissingColumn {
            symbol: symbol.clone(),
            column: name.to_string(),
        };

        let dates = frame
            .column("date")
            .map_err(|_| missing("date"))?
            .cast(&DataType::Int32)?;
        let prices = frame
            .column(column)
            .map_err(|_| missing(column))?
            .cast(&DataType::Float64)?;

        let mut points = Vec::with_capacity(frame.height());
        for (day, price) in dates.i32()?.into_iter().zip(prices.f64()?.into_iter()) {
            let (Some(day), Some(price)) = (day, price) else {
                return Err(DataError::InvalidSeries {
                    symbol,
                    reason: format!("null entry in '{column}'"),
                });
            };
            let date = NaiveDate::from_num_days_from_ce_opt(day + UNIX_EPOCH_DAYS_FROM_CE)
                .ok_or_else(|| DataError::TimeConversion(format!("day {day} out of range")))?;
            points.push((date, price));
        }

        Self::from_points(symbol, points)
    }

    /// An empty series for a symbol without data.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Symbol the series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Trading dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values, one per date.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no observations.
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First value.
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Last value.
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// First and last date.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Iterate over (date, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Value on a given date.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Apply `f` to every value, keeping the dates.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            symbol: self.symbol.clone(),
            dates: self.dates.clone(),
            values: self.values.iter().map(|v| f(*v)).collect(),
        }
    }

    /// Keep only the given dates (which must be sorted).
    pub fn restrict_to(&self, dates: &[NaiveDate]) -> Self {
        let (dates, values) = self
            .iter()
            .filter(|(date, _)| dates.binary_search(date).is_ok())
            .unzip();
        Self {
            symbol: self.symbol.clone(),
            dates,
            values,
        }
    }

    /// Same series under a different name.
    pub fn renamed(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    fn invalid(&self, reason: String) -> DataError {
        DataError::InvalidSeries {
            symbol: self.symbol.clone(),
            reason,
        }
    }
}

/// Dates present in every series, in ascending order.
pub fn common_dates<'a>(series: impl IntoIterator<Item = &'a PriceSeries>) -> Vec<NaiveDate> {
    let mut series = series.into_iter();
    let Some(first) = series.next() else {
        return Vec::new();
    };

    series.fold(first.dates().to_vec(), |acc, s| {
        acc.into_iter()
            .filter(|date| s.dates().binary_search(date).is_ok())
            .collect()
    })
}

/// Restrict two series to their common dates.
pub fn align(a: &PriceSeries, b: &PriceSeries) -> (PriceSeries, PriceSeries) {
    let dates = common_dates([a, b]);
    (a.restrict_to(&dates), b.restrict_to(&dates))
}
