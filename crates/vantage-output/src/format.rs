//! Formatting of metric values and composition bars.

use chrono::NaiveDate;
use vantage_metrics::{MetricStyle, MetricValue};

/// Placeholder for metrics without a value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Width of a full composition bar.
pub const BAR_WIDTH: usize = 20;

/// Format a metric according to its display style.
///
/// ```
/// use vantage_metrics::{MetricStyle, MetricValue};
/// use vantage_output::format_metric;
///
/// assert_eq!(format_metric(MetricValue::Value(0.1234), MetricStyle::Percent), "12.34%");
/// assert_eq!(format_metric(MetricValue::Undefined, MetricStyle::Ratio), "N/A");
/// ```
pub fn format_metric(value: MetricValue, style: MetricStyle) -> String {
    match value {
        MetricValue::Value(v) => match style {
            MetricStyle::Percent => format!("{:.2}%", v * 100.0),
            MetricStyle::Ratio => format!("{v:.2}"),
            MetricStyle::Days => format!("{v:.1}"),
        },
        MetricValue::Undefined | MetricValue::NotApplicable => NOT_AVAILABLE.to_string(),
    }
}

/// Format a fraction as a signed percentage.
pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value * 100.0)
}

/// Month label such as `Feb-2024`.
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1).map_or_else(
        || format!("{year}-{month:02}"),
        |date| date.format("%b-%Y").to_string(),
    )
}

/// Horizontal bar proportional to `weight`, [`BAR_WIDTH`] blocks at 1.0.
pub fn composition_bar(weight: f64) -> String {
    let blocks = (BAR_WIDTH as f64 * weight).floor();
    if blocks.is_nan() || blocks <= 0.0 {
        return String::new();
    }
    "█".repeat(blocks as usize)
}
