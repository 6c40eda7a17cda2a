//! Metrics of a series relative to its benchmark.
//!
//! Both series must cover exactly the same dates. Misalignment is a contract
//! violation and is reported as [`MetricsError::Misaligned`] rather than
//! silently paired by position.

use crate::{
    error::{MetricsError, Result},
    returns::{ANNUALIZATION, covariance, finite_metric, mean, sample_std, simple_returns},
};
use vantage_data::PriceSeries;

/// Check that two series share the same date vector.
///
/// # Errors
///
/// [`MetricsError::Misaligned`] naming both series and the first difference.
pub fn ensure_aligned(series: &PriceSeries, benchmark: &PriceSeries) -> Result<()> {
    let misaligned = |reason: String| MetricsError::Misaligned {
        left: series.symbol().to_string(),
        right: benchmark.symbol().to_string(),
        reason,
    };

    if series.len() != benchmark.len() {
        return Err(misaligned(format!(
            "{} vs {} observations",
            series.len(),
            benchmark.len()
        )));
    }

    if let Some((left, right)) = series
        .dates()
        .iter()
        .zip(benchmark.dates())
        .find(|(left, right)| left != right)
    {
        return Err(misaligned(format!("{left} vs {right}")));
    }

    Ok(())
}

/// Daily active returns of `series` over `benchmark`.
fn excess_returns(series: &PriceSeries, benchmark: &PriceSeries) -> Vec<f64> {
    simple_returns(series)
        .into_iter()
        .zip(simple_returns(benchmark))
        .map(|(asset, bench)| asset - bench)
        .collect()
}

/// Information ratio: annualized mean active return over annualized
/// tracking error.
///
/// Tracking error uses the sample standard deviation. `Ok(None)` when fewer
/// than two active returns exist or tracking error is zero.
///
/// # Errors
///
/// [`MetricsError::Misaligned`] if the date vectors differ.
pub fn information_ratio(series: &PriceSeries, benchmark: &PriceSeries) -> Result<Option<f64>> {
    ensure_aligned(series, benchmark)?;

    let excess = excess_returns(series, benchmark);
    let Some(tracking) = sample_std(&excess) else {
        return Ok(None);
    };
    if tracking == 0.0 {
        return Ok(None);
    }

    Ok(mean(&excess)
        .and_then(|m| finite_metric(m * ANNUALIZATION / (tracking * ANNUALIZATION.sqrt()))))
}

/// Beta: `cov(R_s, R_b) / var(R_b)`.
///
/// `Ok(None)` with fewer than two returns or a flat benchmark.
///
/// # Errors
///
/// [`MetricsError::Misaligned`] if the date vectors differ.
pub fn beta(series: &PriceSeries, benchmark: &PriceSeries) -> Result<Option<f64>> {
    ensure_aligned(series, benchmark)?;

    let asset = simple_returns(series);
    let bench = simple_returns(benchmark);

    let (Some(cov), Some(var)) = (covariance(&asset, &bench, 1), covariance(&bench, &bench, 1))
    else {
        return Ok(None);
    };
    if var == 0.0 {
        return Ok(None);
    }

    Ok(finite_metric(cov / var))
}
