//! The index-versus-benchmark dashboard.
//!
//! A [`Dashboard`] holds everything shown for one index: the composition,
//! both normalized series, the two metric tables, monthly returns and any
//! notices raised while building it.

use crate::format::{composition_bar, format_metric, format_percent, month_label};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use vantage_data::PriceSeries;
use vantage_metrics::{Diagnostic, IndexDefinition, MetricKind, MetricsReport, MonthlyComparison};

const RULE_WIDTH: usize = 72;

/// One constituent as displayed in the composition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionRow {
    /// Security symbol.
    pub symbol: String,
    /// Weight in the index.
    pub weight: f64,
    /// Whether the constituent contributed to the index.
    pub included: bool,
}

impl CompositionRow {
    /// Rows for every constituent of `definition`, flagging those in
    /// `included`.
    pub fn from_definition(definition: &IndexDefinition, included: &[String]) -> Vec<Self> {
        definition
            .constituents
            .iter()
            .map(|c| Self {
                symbol: c.symbol.clone(),
                weight: c.weight,
                included: included.contains(&c.symbol),
            })
            .collect()
    }
}

/// A formatted row of the metrics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Metric label.
    pub metric: String,
    /// Index value.
    pub index: String,
    /// Benchmark value.
    pub benchmark: String,
}

/// Everything displayed for one index and its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Index name.
    pub name: String,
    /// Index description.
    pub description: String,
    /// Benchmark symbol.
    pub benchmark: String,
    /// Index series, aligned with the benchmark when one is available.
    pub index_series: PriceSeries,
    /// Benchmark rebased to 100.
    pub benchmark_series: PriceSeries,
    /// Metrics of the index.
    pub index_metrics: MetricsReport,
    /// Metrics of the benchmark.
    pub benchmark_metrics: MetricsReport,
    /// Constituents and weights.
    pub composition: Vec<CompositionRow>,
    /// Monthly returns side by side.
    pub monthly: Vec<MonthlyComparison>,
    /// Notices raised while building the dashboard.
    pub diagnostics: Vec<Diagnostic>,
}

impl Dashboard {
    /// First and last date of the index series.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.index_series.date_range()
    }

    /// The ten metrics formatted for display, in table order.
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        MetricKind::ALL
            .into_iter()
            .map(|kind| MetricRow {
                metric: kind.label().to_string(),
                index: format_metric(self.index_metrics.get(kind), kind.style()),
                benchmark: format_metric(self.benchmark_metrics.get(kind), kind.style()),
            })
            .collect()
    }

    fn period_line(&self) -> String {
        self.period().map_or_else(
            || "Period: no data".to_string(),
            |(start, end)| format!("Period: {start} to {end}"),
        )
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{} vs {}\n", self.name, self.benchmark));
        if !self.description.is_empty() {
            output.push_str(&format!("{}\n", self.description));
        }
        output.push_str(&self.period_line());
        output.push('\n');
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        output.push_str("\nComposition:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        for row in &self.composition {
            output.push_str(&format!(
                "  {:<12} {:>7.2}%  {:<20}",
                row.symbol,
                row.weight * 100.0,
                composition_bar(row.weight)
            ));
            if !row.included {
                output.push_str("  (no data)");
            }
            output.push('\n');
        }

        output.push_str("\nPerformance:\n");
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>16} {:>16}\n",
            "Metric", self.name, self.benchmark
        ));
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');
        for row in self.metric_rows() {
            output.push_str(&format!(
                "{:<28} {:>16} {:>16}\n",
                row.metric, row.index, row.benchmark
            ));
        }

        if !self.monthly.is_empty() {
            output.push_str("\nMonthly Returns:\n");
            output.push_str(&"-".repeat(RULE_WIDTH));
            output.push('\n');
            output.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12}\n",
                "Month", "Index", "Benchmark", "Difference"
            ));
            for m in &self.monthly {
                output.push_str(&format!(
                    "{:<10} {:>12} {:>12} {:>12}\n",
                    month_label(m.year, m.month),
                    format_percent(m.index),
                    format_percent(m.benchmark),
                    format_percent(m.difference)
                ));
            }
        }

        if !self.diagnostics.is_empty() {
            output.push_str("\nNotices:\n");
            output.push_str(&"-".repeat(RULE_WIDTH));
            output.push('\n');
            for diagnostic in &self.diagnostics {
                output.push_str(&format!("  ! {diagnostic}\n"));
            }
        }

        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {} vs {}\n\n", self.name, self.benchmark));
        if !self.description.is_empty() {
            output.push_str(&format!("{}\n\n", self.description));
        }
        output.push_str(&format!("{}\n\n", self.period_line()));

        output.push_str("## Composition\n\n");
        output.push_str("| Symbol | Weight | |\n");
        output.push_str("|--------|--------|---|\n");
        for row in &self.composition {
            let bar = if row.included {
                composition_bar(row.weight)
            } else {
                "no data".to_string()
            };
            output.push_str(&format!(
                "| {} | {:.2}% | {} |\n",
                row.symbol,
                row.weight * 100.0,
                bar
            ));
        }

        output.push_str("\n## Performance\n\n");
        output.push_str(&format!("| Metric | {} | {} |\n", self.name, self.benchmark));
        output.push_str("|--------|-------|-----------|\n");
        for row in self.metric_rows() {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                row.metric, row.index, row.benchmark
            ));
        }

        if !self.monthly.is_empty() {
            output.push_str("\n## Monthly Returns\n\n");
            output.push_str("| Month | Index | Benchmark | Difference |\n");
            output.push_str("|-------|-------|-----------|------------|\n");
            for m in &self.monthly {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    month_label(m.year, m.month),
                    format_percent(m.index),
                    format_percent(m.benchmark),
                    format_percent(m.difference)
                ));
            }
        }

        if !self.diagnostics.is_empty() {
            output.push_str("\n## Notices\n\n");
            for diagnostic in &self.diagnostics {
                output.push_str(&format!("- {diagnostic}\n"));
            }
        }

        output
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {} ({})", self.name, self.benchmark, self.period_line())?;
        for row in self.metric_rows() {
            writeln!(f, "  {}: {} / {}", row.metric, row.index, row.benchmark)?;
        }
        Ok(())
    }
}
