//! Daily returns and the moment helpers shared by every metric.

use vantage_data::PriceSeries;

/// Trading days per year used for every annualization.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Trading days per year as a float.
pub(crate) const ANNUALIZATION: f64 = TRADING_DAYS_PER_YEAR as f64;

/// Decimal places kept in reported metrics.
pub const DECIMALS: i32 = 4;

/// Simple daily returns `P[i] / P[i-1] - 1` (one fewer than prices).
pub fn simple_returns(series: &PriceSeries) -> Vec<f64> {
    series
        .values()
        .windows(2)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

/// Round to [`DECIMALS`] places.
pub fn round_metric(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    (value * scale).round() / scale
}

/// Round a metric, mapping `NaN` and infinities to `None`.
pub(crate) fn finite_metric(value: f64) -> Option<f64> {
    value.is_finite().then(|| round_metric(value))
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Covariance with `ddof` degrees of freedom removed.
pub(crate) fn covariance(a: &[f64], b: &[f64], ddof: usize) -> Option<f64> {
    debug_assert_eq!(a.len(), b.len());
    if a.len() <= ddof {
        return None;
    }
    let mean_a = mean(a)?;
    let mean_b = mean(b)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    Some(sum / (a.len() - ddof) as f64)
}

/// Population standard deviation (ddof = 0).
pub(crate) fn population_std(values: &[f64]) -> Option<f64> {
    covariance(values, values, 0).map(f64::sqrt)
}

/// Sample standard deviation (ddof = 1).
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    covariance(values, values, 1).map(f64::sqrt)
}
