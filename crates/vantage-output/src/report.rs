//! Timestamped dashboard reports.
//!
//! A [`Report`] wraps a [`Dashboard`] with the run parameters that produced
//! it, so a saved JSON file says when it was generated and over which window.

use crate::dashboard::Dashboard;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// First and last date covered by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    /// First observation.
    pub start: NaiveDate,
    /// Last observation.
    pub end: NaiveDate,
}

/// A dashboard snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// Generation time.
    pub generated_at: DateTime<Utc>,
    /// Requested lookback in years.
    pub lookback_years: u32,
    /// Dates actually covered, absent when the index is empty.
    pub period: Option<ReportPeriod>,
    /// The dashboard itself.
    pub dashboard: &'a Dashboard,
}

impl<'a> Report<'a> {
    /// Snapshot `dashboard`, stamped with the current time.
    pub fn new(dashboard: &'a Dashboard, lookback_years: u32) -> Self {
        Self {
            generated_at: Utc::now(),
            lookback_years,
            period: dashboard
                .period()
                .map(|(start, end)| ReportPeriod { start, end }),
            dashboard,
        }
    }

    /// Override the generation time.
    pub const fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON form to `path`, newline-terminated.
    pub fn write_json(&self, path: &Path) -> Result<(), ReportError> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}
