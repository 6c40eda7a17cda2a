//! Non-fatal conditions surfaced to the caller alongside results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition worth showing the user that did not stop the computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A constituent returned no data and was left out of the index.
    DataUnavailable {
        /// Affected symbol
        symbol: String,
    },
    /// The benchmark returned no data, so there is nothing to compare against.
    BenchmarkUnavailable {
        /// Benchmark symbol
        symbol: String,
    },
    /// A series is too short for a trailing-window metric.
    InsufficientHistory {
        /// Affected series
        series: String,
        /// Observations required
        required: usize,
        /// Observations available
        actual: usize,
    },
}

impl Diagnostic {
    /// Data-unavailable diagnostic for `symbol`.
    pub fn data_unavailable(symbol: impl Into<String>) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
        }
    }

    /// Benchmark-unavailable diagnostic for `symbol`.
    pub fn benchmark_unavailable(symbol: impl Into<String>) -> Self {
        Self::BenchmarkUnavailable {
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable { symbol } => {
                write!(f, "No data available for {symbol}; excluded from the index")
            }
            Self::BenchmarkUnavailable { symbol } => write!(
                f,
                "No data available for benchmark {symbol}; relative metrics are not available"
            ),
            Self::InsufficientHistory {
                series,
                required,
                actual,
            } => write!(
                f,
                "Not enough history for {series} to compute the 12-month return \
                 ({actual} of {required} observations)"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diag = Diagnostic::data_unavailable("EZTC3.SA");
        assert_eq!(
            diag.to_string(),
            "No data available for EZTC3.SA; excluded from the index"
        );
    }

    #[test]
    fn test_benchmark_display() {
        let diag = Diagnostic::benchmark_unavailable("^BVSP");
        assert_eq!(
            diag.to_string(),
            "No data available for benchmark ^BVSP; relative metrics are not available"
        );
        assert!(!diag.to_string().contains("excluded from the index"));
    }

    #[test]
    fn test_insufficient_history_display() {
        let diag = Diagnostic::InsufficientHistory {
            series: "Index X".to_string(),
            required: 252,
            actual: 100,
        };
        assert!(diag.to_string().contains("(100 of 252 observations)"));
    }
}
