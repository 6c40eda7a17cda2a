#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vantage/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod diagnostics;
pub mod drawdown;
pub mod error;
pub mod index;
pub mod monthly;
pub mod performance;
pub mod relative;
pub mod report;
pub mod returns;

// Re-export main types
pub use diagnostics::Diagnostic;
pub use drawdown::{
    DrawdownEpisode, average_recovery_time, drawdown_episodes, drawdown_series, max_drawdown,
};
pub use error::{MetricsError, Result};
pub use index::{
    BASE_LEVEL, IndexBuild, IndexBuilder, IndexDefinition, WeightedConstituent, build_benchmark,
    build_index, normalize,
};
pub use monthly::{
    DEFAULT_MONTHLY_WINDOW, MonthlyComparison, MonthlyReturn, compare_monthly, monthly_returns,
    recent_months,
};
pub use performance::{
    cumulative_return, omega_ratio, sharpe_ratio, sortino_ratio, trailing_return, volatility,
};
pub use relative::{beta, ensure_aligned, information_ratio};
pub use report::{MetricEntry, MetricKind, MetricStyle, MetricValue, MetricsConfig, MetricsReport};
pub use returns::{TRADING_DAYS_PER_YEAR, round_metric, simple_returns};
