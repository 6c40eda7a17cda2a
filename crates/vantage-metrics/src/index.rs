//! Custom index construction.
//!
//! Every constituent is rebased to `100 * weight` on its first observation and
//! the rebased series are summed on the dates all included constituents share.
//! A constituent without data is dropped and reported, never zero-filled, so
//! the index starts at `100 * sum(included weights)`.

use crate::{
    diagnostics::Diagnostic,
    error::{MetricsError, Result},
};
use serde::{Deserialize, Serialize};
use vantage_data::{PriceSeries, common_dates};

/// Base level of a normalized series.
pub const BASE_LEVEL: f64 = 100.0;

/// A security and its static weight in an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedConstituent {
    /// Security symbol.
    pub symbol: String,
    /// Weight in the index. Weights are expected to sum to 1.0 but this is
    /// not enforced.
    pub weight: f64,
}

impl WeightedConstituent {
    /// Create a new weighted constituent.
    pub fn new(symbol: impl Into<String>, weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}

/// Named constituent table of a custom index and the benchmark it is
/// compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Display name of the index.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Benchmark symbol.
    pub benchmark: String,
    /// Constituents with their weights.
    pub constituents: Vec<WeightedConstituent>,
}

impl IndexDefinition {
    /// Create a new index definition.
    pub fn new(
        name: impl Into<String>,
        benchmark: impl Into<String>,
        constituents: Vec<WeightedConstituent>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            benchmark: benchmark.into(),
            constituents,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Constituent symbols in definition order.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Weight of `symbol`, if it is a constituent.
    pub fn weight_of(&self, symbol: &str) -> Option<f64> {
        self.constituents
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.weight)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.constituents.iter().map(|c| c.weight).sum()
    }
}

/// Output of index construction.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexBuild {
    /// The aggregated index series.
    pub series: PriceSeries,
    /// Symbols that contributed, in input order.
    pub included: Vec<String>,
    /// Constituents left out and why.
    pub diagnostics: Vec<Diagnostic>,
}

/// Rebase a series so its first value is `100 * weight`.
///
/// An empty series stays empty.
pub fn normalize(series: &PriceSeries, weight: f64) -> PriceSeries {
    series.first().map_or_else(
        || series.clone(),
        |first| series.map_values(|price| price / first * BASE_LEVEL * weight),
    )
}

/// Rebase the benchmark to 100.
pub fn build_benchmark(series: &PriceSeries) -> PriceSeries {
    normalize(series, 1.0)
}

/// Aggregate weighted constituents into an index named `name`.
///
/// # Errors
///
/// [`MetricsError::InvalidIndex`] if a weight is negative or not finite, or
/// if the constituents with data all weigh zero. Either would give index
/// levels that are not positive prices.
pub fn build_index(name: &str, constituents: &[(PriceSeries, f64)]) -> Result<IndexBuild> {
    let invalid = |reason: String| MetricsError::InvalidIndex {
        index: name.to_string(),
        reason,
    };

    let mut diagnostics = Vec::new();
    let mut included = Vec::new();
    let mut normalized = Vec::new();
    let mut included_weight = 0.0;

    for (series, weight) in constituents {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(invalid(format!("weight {weight} of {}", series.symbol())));
        }
        if series.is_empty() {
            tracing::warn!(
                symbol = series.symbol(),
                index = name,
                "constituent has no data, skipping"
            );
            diagnostics.push(Diagnostic::data_unavailable(series.symbol()));
            continue;
        }
        included.push(series.symbol().to_string());
        normalized.push(normalize(series, *weight));
        included_weight += weight;
    }

    if !normalized.is_empty() && included_weight <= 0.0 {
        return Err(invalid(format!("constituents with data weigh {included_weight}")));
    }

    let dates = common_dates(&normalized);
    let values: Vec<f64> = dates
        .iter()
        .map(|date| normalized.iter().filter_map(|s| s.value_on(*date)).sum::<f64>())
        .collect();

    if let Some(longest) = normalized.iter().map(PriceSeries::len).max()
        && longest > dates.len()
    {
        tracing::debug!(
            index = name,
            dropped = longest - dates.len(),
            "dates not shared by every constituent were dropped"
        );
    }

    Ok(IndexBuild {
        series: PriceSeries::derived(name, dates, values)?,
        included,
        diagnostics,
    })
}

/// Builds the index of one [`IndexDefinition`] from fetched histories.
#[derive(Debug, Clone, Copy)]
pub struct IndexBuilder<'a> {
    definition: &'a IndexDefinition,
}

impl<'a> IndexBuilder<'a> {
    /// Create a builder for `definition`.
    pub const fn new(definition: &'a IndexDefinition) -> Self {
        Self { definition }
    }

    /// Build the index, matching histories to constituents by symbol.
    ///
    /// A constituent with no matching history is treated as having no data.
    pub fn build(&self, histories: &[PriceSeries]) -> Result<IndexBuild> {
        let pairs: Vec<(PriceSeries, f64)> = self
            .definition
            .constituents
            .iter()
            .map(|c| {
                let series = histories
                    .iter()
                    .find(|s| s.symbol() == c.symbol)
                    .cloned()
                    .unwrap_or_else(|| PriceSeries::empty(&c.symbol));
                (series, c.weight)
            })
            .collect();

        build_index(&self.definition.name, &pairs)
    }
}
