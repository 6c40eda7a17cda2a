#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vantage/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod file;
pub mod memory;
pub mod provider;
pub mod series;
pub mod yahoo;

pub use error::{DataError, Result};
pub use provider::{FetchConfig, PriceProvider};
pub use series::{PriceSeries, align, common_dates};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
