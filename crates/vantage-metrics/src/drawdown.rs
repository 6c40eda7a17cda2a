//! Drawdown analysis.

use crate::returns::finite_metric;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vantage_data::PriceSeries;

/// A period spent below a previous peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownEpisode {
    /// First day below the peak.
    pub start: NaiveDate,
    /// Day of the deepest drawdown.
    pub trough: NaiveDate,
    /// Day the previous peak was regained, if it was.
    pub recovery: Option<NaiveDate>,
    /// Deepest drawdown reached (negative).
    pub depth: f64,
    /// Trading days from start to recovery, or to the end of the series
    /// when still open.
    pub length: usize,
}

impl DrawdownEpisode {
    /// Whether the episode ended with a recovery.
    pub const fn is_recovered(&self) -> bool {
        self.recovery.is_some()
    }
}

/// Daily drawdown `P[t] / max(P[..=t]) - 1`.
pub fn drawdown_series(series: &PriceSeries) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    series
        .values()
        .iter()
        .map(|&price| {
            peak = peak.max(price);
            price / peak - 1.0
        })
        .collect()
}

/// Worst drawdown over the series. Always `<= 0`.
pub fn max_drawdown(series: &PriceSeries) -> Option<f64> {
    drawdown_series(series)
        .into_iter()
        .reduce(f64::min)
        .and_then(finite_metric)
}

/// Split the series into drawdown episodes, oldest first.
pub fn drawdown_episodes(series: &PriceSeries) -> Vec<DrawdownEpisode> {
    let dates = series.dates();
    let drawdowns = drawdown_series(series);

    let mut episodes = Vec::new();
    // (start index, trough index)
    let mut open: Option<(usize, usize)> = None;

    for (i, &dd) in drawdowns.iter().enumerate() {
        match open {
            None if dd < 0.0 => open = Some((i, i)),
            Some((start, trough)) if dd == 0.0 => {
                episodes.push(DrawdownEpisode {
                    start: dates[start],
                    trough: dates[trough],
                    recovery: Some(dates[i]),
                    depth: drawdowns[trough],
                    length: i - start,
                });
                open = None;
            }
            Some((start, trough)) if dd < drawdowns[trough] => open = Some((start, i)),
            _ => {}
        }
    }

    if let Some((start, trough)) = open {
        episodes.push(DrawdownEpisode {
            start: dates[start],
            trough: dates[trough],
            recovery: None,
            depth: drawdowns[trough],
            length: drawdowns.len() - start,
        });
    }

    episodes
}

/// Mean length in trading days of the recovered drawdown episodes.
///
/// An episode still open at the end of the series is left out. `None` when
/// no episode has recovered.
pub fn average_recovery_time(series: &PriceSeries) -> Option<f64> {
    let lengths: Vec<usize> = drawdown_episodes(series)
        .into_iter()
        .filter(DrawdownEpisode::is_recovered)
        .map(|episode| episode.length)
        .collect();

    if lengths.is_empty() {
        return None;
    }
    let total: usize = lengths.iter().sum();
    finite_metric(total as f64 / lengths.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn series(prices: &[f64]) -> PriceSeries {
        let dates = (0..prices.len())
            .map(|i| start() + Duration::days(i as i64))
            .collect();
        PriceSeries::new("DD", dates, prices.to_vec()).unwrap()
    }

    #[test]
    fn test_max_drawdown() {
        assert_eq!(max_drawdown(&series(&[100.0, 90.0, 80.0, 95.0])), Some(-0.2));
    }

    #[test]
    fn test_max_drawdown_of_rising_series() {
        assert_eq!(max_drawdown(&series(&[100.0, 101.0, 105.0])), Some(0.0));
    }

    #[test]
    fn test_max_drawdown_empty() {
        assert_eq!(max_drawdown(&PriceSeries::empty("DD")), None);
    }

    #[test]
    fn test_drawdown_series() {
        let dd = drawdown_series(&series(&[100.0, 50.0, 100.0, 120.0, 90.0]));
        assert_eq!(dd, vec![0.0, -0.5, 0.0, 0.0, -0.25]);
    }

    #[test]
    fn test_episodes() {
        let s = series(&[100.0, 90.0, 80.0, 100.0, 110.0, 105.0, 111.0, 100.0]);
        let episodes = drawdown_episodes(&s);

        assert_eq!(episodes.len(), 3);

        assert_eq!(episodes[0].start, start() + Duration::days(1));
        assert_eq!(episodes[0].trough, start() + Duration::days(2));
        assert_eq!(episodes[0].recovery, Some(start() + Duration::days(3)));
        assert_eq!(episodes[0].length, 2);
        assert!((episodes[0].depth + 0.2).abs() < 1e-12);

        assert_eq!(episodes[1].length, 1);
        assert!(episodes[1].is_recovered());

        assert_eq!(episodes[2].recovery, None);
        assert_eq!(episodes[2].length, 1);
    }

    #[test]
    fn test_average_recovery_excludes_open_episode() {
        // Recovered episodes of 2 and 1 days; the final open one is ignored
        let s = series(&[100.0, 90.0, 80.0, 100.0, 110.0, 105.0, 111.0, 100.0, 90.0]);
        assert_eq!(average_recovery_time(&s), Some(1.5));
    }

    #[test]
    fn test_average_recovery_without_recovery() {
        assert_eq!(average_recovery_time(&series(&[100.0, 90.0, 95.0])), None);
        assert_eq!(average_recovery_time(&series(&[100.0, 101.0])), None);
    }
}
