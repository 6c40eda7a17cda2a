//! Calendar-month returns.

use crate::returns::{finite_metric, round_metric};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use vantage_data::PriceSeries;

/// Months shown in the monthly table unless configured otherwise.
pub const DEFAULT_MONTHLY_WINDOW: usize = 12;

/// Compounded return of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u32,
    /// Compounded return over the month.
    pub value: f64,
}

/// Index and benchmark return for the same month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyComparison {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 to 12.
    pub month: u32,
    /// Index return.
    pub index: f64,
    /// Benchmark return.
    pub benchmark: f64,
    /// `index - benchmark`.
    pub difference: f64,
}

/// Daily returns compounded per calendar month, oldest first.
///
/// Each daily return belongs to the month of the later of its two prices.
/// Months whose compounded return is not finite are left out.
pub fn monthly_returns(series: &PriceSeries) -> Vec<MonthlyReturn> {
    let dates = series.dates();
    let mut months: Vec<MonthlyReturn> = Vec::new();

    for (i, window) in series.values().windows(2).enumerate() {
        let date = dates[i + 1];
        let growth = window[1] / window[0];

        match months.last_mut() {
            Some(last) if last.year == date.year() && last.month == date.month() => {
                last.value = (1.0 + last.value) * growth - 1.0;
            }
            _ => months.push(MonthlyReturn {
                year: date.year(),
                month: date.month(),
                value: growth - 1.0,
            }),
        }
    }

    months
        .into_iter()
        .filter_map(|month| {
            Some(MonthlyReturn {
                value: finite_metric(month.value)?,
                ..month
            })
        })
        .collect()
}

/// Pair index and benchmark monthly returns for months present in both.
pub fn compare_monthly(index: &PriceSeries, benchmark: &PriceSeries) -> Vec<MonthlyComparison> {
    let bench = monthly_returns(benchmark);

    monthly_returns(index)
        .into_iter()
        .filter_map(|m| {
            let b = bench
                .iter()
                .find(|b| b.year == m.year && b.month == m.month)?;
            Some(MonthlyComparison {
                year: m.year,
                month: m.month,
                index: m.value,
                benchmark: b.value,
                difference: round_metric(m.value - b.value),
            })
        })
        .collect()
}

/// The `months` most recent rows of a monthly table.
pub fn recent_months(rows: &[MonthlyComparison], months: usize) -> &[MonthlyComparison] {
    &rows[rows.len().saturating_sub(months)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_returns_compound() {
        let series = PriceSeries::from_points(
            "X",
            [
                (ymd(2024, 1, 30), 100.0),
                (ymd(2024, 1, 31), 110.0),
                (ymd(2024, 2, 1), 121.0),
                (ymd(2024, 2, 2), 108.9),
            ],
        )
        .unwrap();

        let months = monthly_returns(&series);

        assert_eq!(months.len(), 2);
        assert_eq!((months[0].year, months[0].month), (2024, 1));
        assert_relative_eq!(months[0].value, 0.10);
        // +10% then -10%
        assert_eq!((months[1].year, months[1].month), (2024, 2));
        assert_relative_eq!(months[1].value, -0.01);
    }

    #[test]
    fn test_monthly_returns_cross_year() {
        let series = PriceSeries::from_points(
            "X",
            [(ymd(2023, 12, 29), 100.0), (ymd(2024, 1, 2), 105.0)],
        )
        .unwrap();

        let months = monthly_returns(&series);
        assert_eq!(months.len(), 1);
        assert_eq!((months[0].year, months[0].month), (2024, 1));
        assert_relative_eq!(months[0].value, 0.05);
    }

    #[test]
    fn test_monthly_returns_short_series() {
        let series = PriceSeries::from_points("X", [(ymd(2024, 1, 2), 100.0)]).unwrap();
        assert!(monthly_returns(&series).is_empty());
    }

    #[test]
    fn test_compare_monthly_keeps_shared_months() {
        let index = PriceSeries::from_points(
            "I",
            [
                (ymd(2024, 1, 31), 100.0),
                (ymd(2024, 2, 29), 104.0),
                (ymd(2024, 3, 28), 106.08),
            ],
        )
        .unwrap();
        let bench = PriceSeries::from_points(
            "B",
            [(ymd(2024, 1, 31), 100.0), (ymd(2024, 2, 29), 101.0)],
        )
        .unwrap();

        let rows = compare_monthly(&index, &bench);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, 2);
        assert_relative_eq!(rows[0].index, 0.04);
        assert_relative_eq!(rows[0].benchmark, 0.01);
        assert_relative_eq!(rows[0].difference, 0.03);
    }

    #[test]
    fn test_recent_months() {
        let rows: Vec<MonthlyComparison> = (1..=14)
            .map(|i| MonthlyComparison {
                year: 2023 + (i - 1) / 12,
                month: ((i - 1) % 12 + 1) as u32,
                index: 0.01,
                benchmark: 0.0,
                difference: 0.01,
            })
            .collect();

        let recent = recent_months(&rows, DEFAULT_MONTHLY_WINDOW);
        assert_eq!(recent.len(), 12);
        assert_eq!((recent[0].year, recent[0].month), (2023, 3));
        assert_eq!((recent[11].year, recent[11].month), (2024, 2));

        assert_eq!(recent_months(&rows[..3], 12).len(), 3);
        assert!(recent_months(&rows, 0).is_empty());
    }

    #[test]
    fn test_zero_levels_have_no_monthly_returns() {
        let series = PriceSeries::derived(
            "Z",
            vec![ymd(2024, 1, 30), ymd(2024, 1, 31), ymd(2024, 2, 1)],
            vec![0.0, 0.0, 0.0],
        )
        .unwrap();

        assert!(monthly_returns(&series).is_empty());
    }
}
