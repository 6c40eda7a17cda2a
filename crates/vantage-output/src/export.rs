//! Export of dashboard data.
//!
//! CSV output is tabular and covers one table at a time; JSON output carries
//! the full structure.

use crate::dashboard::{Dashboard, MetricRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use vantage_metrics::MonthlyComparison;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One day of the index and benchmark levels.
#[derive(Debug, Serialize)]
struct LevelRecord {
    date: NaiveDate,
    index: f64,
    benchmark: Option<f64>,
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn write_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Dashboard {
    /// Daily index and benchmark levels as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn levels_to_csv(&self) -> Result<String, ExportError> {
        write_csv(self.index_series.iter().map(|(date, index)| LevelRecord {
            date,
            index,
            benchmark: self.benchmark_series.value_on(date),
        }))
    }
}

/// CSV is the metrics table; JSON is the whole dashboard.
impl Exporter for Dashboard {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self.metric_rows()),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<MetricRow> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<MonthlyComparison> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => write_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::CompositionRow;
    use vantage_data::PriceSeries;
    use vantage_metrics::{MetricsConfig, MetricsReport};

    fn dashboard() -> Dashboard {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let dates: Vec<NaiveDate> = (0..4).map(|i| start + chrono::Duration::days(i)).collect();
        let index =
            PriceSeries::new("Index Y", dates.clone(), vec![100.0, 101.0, 100.5, 102.0]).unwrap();
        let bench = PriceSeries::new("^BVSP", dates, vec![100.0, 100.5, 99.0, 101.0]).unwrap();
        let config = MetricsConfig::default();

        Dashboard {
            name: "Index Y".to_string(),
            description: "Banks and oil".to_string(),
            benchmark: "^BVSP".to_string(),
            index_metrics: MetricsReport::for_index(&index, &bench, &config).unwrap(),
            benchmark_metrics: MetricsReport::for_benchmark(&bench, &config),
            composition: vec![CompositionRow {
                symbol: "ITUB4.SA".to_string(),
                weight: 1.0,
                included: true,
            }],
            monthly: vantage_metrics::compare_monthly(&index, &bench),
            diagnostics: Vec::new(),
            index_series: index,
            benchmark_series: bench,
        }
    }

    #[test]
    fn test_dashboard_csv_is_metric_table() {
        let csv = dashboard().export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("metric,index,benchmark"));
        assert_eq!(lines.next(), Some("Cumulative Return,2.00%,1.00%"));
        assert_eq!(csv.lines().count(), 11);
    }

    #[test]
    fn test_dashboard_json() {
        let json = dashboard().export_to_string(ExportFormat::Json).unwrap();

        assert!(json.contains("\"name\":\"Index Y\""));
        assert!(json.contains("\"index_metrics\""));
        assert!(json.contains("\"not_applicable\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["composition"][0]["symbol"], "ITUB4.SA");
    }

    #[test]
    fn test_dashboard_pretty_json() {
        let json = dashboard().export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("  ")); // Indentation indicates pretty format
    }

    #[test]
    fn test_levels_csv() {
        let csv = dashboard().levels_to_csv().unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("date,index,benchmark"));
        assert_eq!(lines.next(), Some("2024-06-03,100.0,100.0"));
    }

    #[test]
    fn test_monthly_csv() {
        let monthly = dashboard().monthly;
        let csv = monthly.export_to_string(ExportFormat::Csv).unwrap();

        assert!(csv.starts_with("year,month,index,benchmark,difference"));
        assert!(csv.contains("2024,6,"));
    }

    #[test]
    fn test_export_to_file() {
        let rows = dashboard().metric_rows();
        let path = std::env::temp_dir().join("vantage_export_test.csv");

        rows.export_to_file(&path, ExportFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Omega Ratio"));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
