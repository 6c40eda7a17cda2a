//! Single-series risk/return metrics.
//!
//! All functions take a price series and return `None` when the statistic is
//! not computable. Results are rounded with [`round_metric`](crate::round_metric)
//! and a non-finite result is reported as `None`.

use crate::returns::{
    ANNUALIZATION, TRADING_DAYS_PER_YEAR, finite_metric, mean, population_std, simple_returns,
};
use vantage_data::PriceSeries;

/// Minimum prices needed for an annualized volatility.
const MIN_VOLATILITY_PRICES: usize = 3;

/// Total return over the whole series: `P[n-1] / P[0] - 1`.
pub fn cumulative_return(series: &PriceSeries) -> Option<f64> {
    let first = series.first()?;
    let last = series.last()?;
    finite_metric(last / first - 1.0)
}

/// Return over the last 252 observations: `P[n-1] / P[n-252] - 1`.
///
/// `None` when fewer than 252 prices are available.
pub fn trailing_return(series: &PriceSeries) -> Option<f64> {
    trailing_return_over(series, TRADING_DAYS_PER_YEAR)
}

/// Return over the last `window` observations.
pub fn trailing_return_over(series: &PriceSeries, window: usize) -> Option<f64> {
    let n = series.len();
    if window == 0 || n < window {
        tracing::warn!(
            series = series.symbol(),
            required = window,
            actual = n,
            "not enough history for trailing return"
        );
        return None;
    }

    let prices = series.values();
    finite_metric(prices[n - 1] / prices[n - window] - 1.0)
}

fn annualized_volatility(returns: &[f64]) -> Option<f64> {
    if returns.len() + 1 < MIN_VOLATILITY_PRICES {
        return None;
    }
    population_std(returns).map(|std| std * ANNUALIZATION.sqrt())
}

/// Annualized volatility: population standard deviation of daily returns
/// times `sqrt(252)`.
pub fn volatility(series: &PriceSeries) -> Option<f64> {
    annualized_volatility(&simple_returns(series)).and_then(finite_metric)
}

/// Sharpe ratio: `(mean(R) * 252 - rf) / volatility`.
pub fn sharpe_ratio(series: &PriceSeries, risk_free_rate: f64) -> Option<f64> {
    let returns = simple_returns(series);
    let vol = annualized_volatility(&returns)?;
    if vol == 0.0 {
        return None;
    }
    let annual_return = mean(&returns)? * ANNUALIZATION;
    finite_metric((annual_return - risk_free_rate) / vol)
}

/// Sortino ratio: excess annual return over the annualized population
/// deviation of the negative daily returns.
pub fn sortino_ratio(series: &PriceSeries, risk_free_rate: f64) -> Option<f64> {
    let returns = simple_returns(series);
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();

    let downside_risk = population_std(&downside)? * ANNUALIZATION.sqrt();
    if downside_risk == 0.0 {
        return None;
    }
    let annual_return = mean(&returns)? * ANNUALIZATION;
    finite_metric((annual_return - risk_free_rate) / downside_risk)
}

/// Omega ratio: gains above `target` over losses below it.
pub fn omega_ratio(series: &PriceSeries, target: f64) -> Option<f64> {
    let returns = simple_returns(series);
    let gains: f64 = returns.iter().filter(|r| **r > target).sum();
    let losses: f64 = -returns.iter().filter(|r| **r < target).sum::<f64>();

    if losses == 0.0 {
        return None;
    }
    finite_metric(gains / losses)
}
