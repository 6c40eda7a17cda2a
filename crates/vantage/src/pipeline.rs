//! End-to-end dashboard construction.
//!
//! Fetch every constituent and then the benchmark, with at most
//! [`FetchConfig::concurrency`] requests in flight, build the index,
//! align it with the benchmark on shared dates, then compute metrics and
//! monthly returns. Missing data never aborts the pipeline: it is excluded
//! and reported as a [`Diagnostic`].

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vantage_data::{DataError, FetchConfig, PriceProvider, PriceSeries, align};
use vantage_metrics::{
    Diagnostic, IndexBuilder, IndexDefinition, MetricsConfig, MetricsError, MetricsReport,
    TRADING_DAYS_PER_YEAR, build_benchmark, compare_monthly, recent_months,
};
use vantage_output::{CompositionRow, Dashboard};

/// Errors that abort dashboard construction.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The provider failed.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// The index could not be built or a metric contract was violated.
    #[error("Metrics error: {0}")]
    Metrics(#[from] MetricsError),
}

/// Settings of a dashboard run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Data fetching.
    pub fetch: FetchConfig,
    /// Metric parameters.
    pub metrics: MetricsConfig,
}

/// Build the dashboard of `definition` from `provider`'s data.
///
/// # Errors
///
/// Returns [`DashboardError::Data`] if the provider itself fails and
/// [`DashboardError::Metrics`] if the weights cannot form an index or on an
/// internal alignment violation. Symbols without data are not errors.
pub async fn build_dashboard<P: PriceProvider>(
    provider: &P,
    definition: &IndexDefinition,
    config: &DashboardConfig,
) -> Result<Dashboard, DashboardError> {
    let lookback = config.fetch.lookback();
    tracing::info!(
        index = %definition.name,
        constituents = definition.constituents.len(),
        benchmark = %definition.benchmark,
        lookback_years = config.fetch.lookback_years,
        "building dashboard"
    );

    let histories: Vec<PriceSeries> = stream::iter(&definition.constituents)
        .map(|c| provider.fetch_price_history(&c.symbol, lookback))
        .buffered(config.fetch.concurrency())
        .try_collect()
        .await?;
    let benchmark = provider
        .fetch_price_history(&definition.benchmark, lookback)
        .await?;

    let build = IndexBuilder::new(definition).build(&histories)?;
    let mut diagnostics = build.diagnostics;

    let (index_series, benchmark_series) = if benchmark.is_empty() {
        tracing::warn!(benchmark = %definition.benchmark, "benchmark has no data");
        diagnostics.push(Diagnostic::benchmark_unavailable(&definition.benchmark));
        (build.series, benchmark)
    } else {
        let (index, bench) = align(&build.series, &benchmark);
        (index, build_benchmark(&bench))
    };

    for series in [&index_series, &benchmark_series] {
        if !series.is_empty() && series.len() < TRADING_DAYS_PER_YEAR {
            diagnostics.push(Diagnostic::InsufficientHistory {
                series: series.symbol().to_string(),
                required: TRADING_DAYS_PER_YEAR,
                actual: series.len(),
            });
        }
    }

    let index_metrics =
        MetricsReport::for_index(&index_series, &benchmark_series, &config.metrics)?;
    let benchmark_metrics = MetricsReport::for_benchmark(&benchmark_series, &config.metrics);
    let mut monthly = compare_monthly(&index_series, &benchmark_series);
    if let Some(months) = config.metrics.monthly_window {
        monthly = recent_months(&monthly, months).to_vec();
    }

    tracing::debug!(
        index = %definition.name,
        observations = index_series.len(),
        included = build.included.len(),
        notices = diagnostics.len(),
        "dashboard ready"
    );

    Ok(Dashboard {
        name: definition.name.clone(),
        description: definition.description.clone(),
        benchmark: definition.benchmark.clone(),
        composition: CompositionRow::from_definition(definition, &build.included),
        index_series,
        benchmark_series,
        index_metrics,
        benchmark_metrics,
        monthly,
        diagnostics,
    })
}
