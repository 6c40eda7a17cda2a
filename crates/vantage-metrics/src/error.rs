//! Error types for metric computation.

use thiserror::Error;
use vantage_data::DataError;

/// Result type for metric computation.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Contract violations raised by the metrics engine.
///
/// Statistical degeneracy (short history, zero variance) is never an error;
/// those cases yield `None`.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Two series passed to a relative metric are not date-aligned
    #[error("Series {left} and {right} are not aligned: {reason}")]
    Misaligned {
        /// Asset series symbol
        left: String,
        /// Benchmark series symbol
        right: String,
        /// What differs
        reason: String,
    },

    /// Weights that cannot produce a positive index level
    #[error("Invalid index {index}: {reason}")]
    InvalidIndex {
        /// Index name
        index: String,
        /// What is wrong
        reason: String,
    },

    /// Building a derived series failed
    #[error("Series construction failed: {0}")]
    Data(#[from] DataError),
}
