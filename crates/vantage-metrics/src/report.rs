//! The full metric table for an index and its benchmark.

use crate::{
    drawdown::{average_recovery_time, max_drawdown},
    error::Result,
    monthly::DEFAULT_MONTHLY_WINDOW,
    performance::{
        cumulative_return, omega_ratio, sharpe_ratio, sortino_ratio, trailing_return, volatility,
    },
    relative::{beta, information_ratio},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use vantage_data::PriceSeries;

/// Parameters of the metrics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Annual risk-free rate for Sharpe and Sortino.
    pub risk_free_rate: f64,
    /// Daily return threshold separating Omega gains from losses.
    pub omega_target: f64,
    /// Most recent months kept in the monthly table (default: 12). `None`
    /// keeps the whole lookback.
    pub monthly_window: Option<usize>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            omega_target: 0.0,
            monthly_window: Some(DEFAULT_MONTHLY_WINDOW),
        }
    }
}

/// How a metric is meant to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricStyle {
    /// A fraction shown as a percentage.
    Percent,
    /// A dimensionless ratio.
    Ratio,
    /// A count of trading days.
    Days,
}

/// The ten reported metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Total return over the period.
    CumulativeReturn,
    /// Return over the last 252 trading days.
    TrailingReturn,
    /// Annualized volatility.
    Volatility,
    /// Sensitivity to the benchmark.
    Beta,
    /// Worst peak-to-trough decline.
    MaxDrawdown,
    /// Mean days to recover from a drawdown.
    AverageRecoveryTime,
    /// Sharpe ratio.
    SharpeRatio,
    /// Sortino ratio.
    SortinoRatio,
    /// Information ratio against the benchmark.
    InformationRatio,
    /// Omega ratio.
    OmegaRatio,
}

impl MetricKind {
    /// Every metric in display order.
    pub const ALL: [Self; 10] = [
        Self::CumulativeReturn,
        Self::TrailingReturn,
        Self::Volatility,
        Self::Beta,
        Self::MaxDrawdown,
        Self::AverageRecoveryTime,
        Self::SharpeRatio,
        Self::SortinoRatio,
        Self::InformationRatio,
        Self::OmegaRatio,
    ];

    /// Table label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CumulativeReturn => "Cumulative Return",
            Self::TrailingReturn => "12-Month Return",
            Self::Volatility => "Volatility",
            Self::Beta => "Beta",
            Self::MaxDrawdown => "Max Drawdown",
            Self::AverageRecoveryTime => "Avg Recovery Time (days)",
            Self::SharpeRatio => "Sharpe Ratio",
            Self::SortinoRatio => "Sortino Ratio",
            Self::InformationRatio => "Information Ratio",
            Self::OmegaRatio => "Omega Ratio",
        }
    }

    /// Display style.
    pub const fn style(self) -> MetricStyle {
        match self {
            Self::CumulativeReturn
            | Self::TrailingReturn
            | Self::Volatility
            | Self::MaxDrawdown => MetricStyle::Percent,
            Self::AverageRecoveryTime => MetricStyle::Days,
            Self::Beta
            | Self::SharpeRatio
            | Self::SortinoRatio
            | Self::InformationRatio
            | Self::OmegaRatio => MetricStyle::Ratio,
        }
    }

    /// Whether the metric compares a series with the benchmark.
    pub const fn is_relative(self) -> bool {
        matches!(self, Self::Beta | Self::InformationRatio)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    /// A computed value.
    Value(f64),
    /// Not computable for this data (too short, zero denominator).
    Undefined,
    /// Not reported for this series.
    NotApplicable,
}

impl MetricValue {
    /// The value, if computed.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined | Self::NotApplicable => None,
        }
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Value)
    }
}

/// One row of a [`MetricsReport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    /// Which metric.
    pub kind: MetricKind,
    /// Its outcome.
    pub value: MetricValue,
}

/// All ten metrics for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Series the metrics describe.
    pub series: String,
    entries: Vec<MetricEntry>,
}

impl MetricsReport {
    /// Metrics of the index, with relative metrics against `benchmark`.
    ///
    /// An empty benchmark leaves the relative metrics undefined.
    ///
    /// # Errors
    ///
    /// [`MetricsError::Misaligned`](crate::MetricsError::Misaligned) if a
    /// non-empty benchmark does not share the index dates.
    pub fn for_index(
        index: &PriceSeries,
        benchmark: &PriceSeries,
        config: &MetricsConfig,
    ) -> Result<Self> {
        let (index_beta, index_ir) = if benchmark.is_empty() {
            tracing::warn!(
                index = index.symbol(),
                benchmark = benchmark.symbol(),
                "benchmark has no data, relative metrics are undefined"
            );
            (None, None)
        } else {
            (beta(index, benchmark)?, information_ratio(index, benchmark)?)
        };

        let entries = MetricKind::ALL
            .into_iter()
            .map(|kind| {
                let value = match kind {
                    MetricKind::Beta => index_beta,
                    MetricKind::InformationRatio => index_ir,
                    _ => standalone(kind, index, config),
                };
                MetricEntry {
                    kind,
                    value: value.into(),
                }
            })
            .collect();

        Ok(Self {
            series: index.symbol().to_string(),
            entries,
        })
    }

    /// Metrics of the benchmark itself.
    ///
    /// Beta, information ratio and average recovery time are not reported
    /// for the benchmark.
    pub fn for_benchmark(benchmark: &PriceSeries, config: &MetricsConfig) -> Self {
        let entries = MetricKind::ALL
            .into_iter()
            .map(|kind| {
                let value = if kind.is_relative() || kind == MetricKind::AverageRecoveryTime {
                    MetricValue::NotApplicable
                } else {
                    standalone(kind, benchmark, config).into()
                };
                MetricEntry { kind, value }
            })
            .collect();

        Self {
            series: benchmark.symbol().to_string(),
            entries,
        }
    }

    /// Rows in display order.
    pub fn entries(&self) -> &[MetricEntry] {
        &self.entries
    }

    /// Outcome of `kind`.
    pub fn get(&self, kind: MetricKind) -> MetricValue {
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or(MetricValue::NotApplicable, |entry| entry.value)
    }
}

fn standalone(kind: MetricKind, series: &PriceSeries, config: &MetricsConfig) -> Option<f64> {
    match kind {
        MetricKind::CumulativeReturn => cumulative_return(series),
        MetricKind::TrailingReturn => trailing_return(series),
        MetricKind::Volatility => volatility(series),
        MetricKind::MaxDrawdown => max_drawdown(series),
        MetricKind::AverageRecoveryTime => average_recovery_time(series),
        MetricKind::SharpeRatio => sharpe_ratio(series, config.risk_free_rate),
        MetricKind::SortinoRatio => sortino_ratio(series, config.risk_free_rate),
        MetricKind::OmegaRatio => omega_ratio(series, config.omega_target),
        MetricKind::Beta | MetricKind::InformationRatio => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricsError;
    use chrono::{Duration, NaiveDate};

    fn series(symbol: &str, prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..prices.len())
            .map(|i| start + Duration::days(i as i64))
            .collect();
        PriceSeries::new(symbol, dates, prices.to_vec()).unwrap()
    }

    #[test]
    fn test_index_report_has_ten_rows_in_order() {
        let index = series("IDX", &[100.0, 102.0, 99.0, 103.0, 101.0]);
        let bench = series("^BVSP", &[100.0, 101.0, 100.0, 102.0, 101.5]);

        let report = MetricsReport::for_index(&index, &bench, &MetricsConfig::default()).unwrap();

        let kinds: Vec<MetricKind> = report.entries().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, MetricKind::ALL);
        assert_eq!(report.series, "IDX");
        assert_eq!(report.get(MetricKind::CumulativeReturn), MetricValue::Value(0.01));
        // 5 prices cannot cover a 12-month window
        assert_eq!(report.get(MetricKind::TrailingReturn), MetricValue::Undefined);
        assert!(report.get(MetricKind::Beta).value().is_some());
        assert!(report.get(MetricKind::InformationRatio).value().is_some());
    }

    #[test]
    fn test_benchmark_report_marks_not_applicable() {
        let bench = series("^BVSP", &[100.0, 101.0, 100.0, 102.0]);

        let report = MetricsReport::for_benchmark(&bench, &MetricsConfig::default());

        for kind in [
            MetricKind::Beta,
            MetricKind::InformationRatio,
            MetricKind::AverageRecoveryTime,
        ] {
            assert_eq!(report.get(kind), MetricValue::NotApplicable);
        }
        let reported = report
            .entries()
            .iter()
            .filter(|e| e.value != MetricValue::NotApplicable)
            .count();
        assert_eq!(reported, 7);
    }

    #[test]
    fn test_empty_benchmark_leaves_relative_undefined() {
        let index = series("IDX", &[100.0, 102.0, 99.0]);
        let bench = PriceSeries::empty("^BVSP");

        let report = MetricsReport::for_index(&index, &bench, &MetricsConfig::default()).unwrap();

        assert_eq!(report.get(MetricKind::Beta), MetricValue::Undefined);
        assert_eq!(report.get(MetricKind::InformationRatio), MetricValue::Undefined);
        assert!(report.get(MetricKind::Volatility).value().is_some());
    }

    #[test]
    fn test_misaligned_benchmark_fails() {
        let index = series("IDX", &[100.0, 102.0, 99.0]);
        let bench = series("^BVSP", &[100.0, 101.0]);

        let err = MetricsReport::for_index(&index, &bench, &MetricsConfig::default()).unwrap_err();
        assert!(matches!(err, MetricsError::Misaligned { .. }));
    }

    #[test]
    fn test_metric_kind_styles() {
        assert_eq!(MetricKind::MaxDrawdown.style(), MetricStyle::Percent);
        assert_eq!(MetricKind::AverageRecoveryTime.style(), MetricStyle::Days);
        assert_eq!(MetricKind::OmegaRatio.style(), MetricStyle::Ratio);
        assert_eq!(MetricKind::TrailingReturn.to_string(), "12-Month Return");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: MetricsConfig = serde_json::from_str(r#"{"risk_free_rate": 0.1}"#).unwrap();
        assert_eq!(config.risk_free_rate, 0.1);
        assert_eq!(config.omega_target, 0.0);
        assert_eq!(config.monthly_window, Some(12));
    }

    #[test]
    fn test_config_full_monthly_window() {
        let config: MetricsConfig = serde_json::from_str(r#"{"monthly_window": null}"#).unwrap();
        assert_eq!(config.monthly_window, None);
    }
}
