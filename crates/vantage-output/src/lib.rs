#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vantage/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;
pub mod export;
pub mod format;
pub mod report;

pub use dashboard::{CompositionRow, Dashboard, MetricRow};
pub use export::{ExportError, ExportFormat, Exporter};
pub use format::{NOT_AVAILABLE, composition_bar, format_metric, format_percent, month_label};
pub use report::{Report, ReportError, ReportPeriod};
