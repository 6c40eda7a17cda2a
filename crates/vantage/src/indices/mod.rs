//! Index definitions available to the dashboard.
//!
//! The catalog starts from the built-in presets and can be replaced or
//! extended with definitions read from JSON:
//!
//! ```json
//! [
//!   {
//!     "name": "Banks",
//!     "benchmark": "^BVSP",
//!     "constituents": [
//!       { "symbol": "ITUB4.SA", "weight": 0.5 },
//!       { "symbol": "BBDC3.SA", "weight": 0.5 }
//!     ]
//!   }
//! ]
//! ```

pub mod presets;

pub use presets::{IBOVESPA, index_x, index_y};

use std::path::Path;
use thiserror::Error;
use vantage_metrics::IndexDefinition;

/// Errors raised while loading index definitions.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed definition file.
    #[error("Invalid index definitions: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A definition has no constituents, a negative or non-finite weight, or
    /// weights summing to zero.
    #[error("Invalid index '{name}': {reason}")]
    InvalidDefinition {
        /// Index name
        name: String,
        /// What is wrong
        reason: String,
    },
}

/// A named set of index definitions.
#[derive(Debug, Clone)]
pub struct IndexCatalog {
    definitions: Vec<IndexDefinition>,
}

impl Default for IndexCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl IndexCatalog {
    /// Catalog of the built-in presets.
    pub fn builtin() -> Self {
        Self {
            definitions: presets::builtin(),
        }
    }

    /// Parse a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<IndexDefinition> = serde_json::from_str(json)?;
        definitions.iter().try_for_each(validate)?;
        Ok(Self { definitions })
    }

    /// Read a JSON array of definitions from `path`.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), count = catalog.len(), "loaded index definitions");
        Ok(catalog)
    }

    /// Add definitions from `other`, replacing those with the same name.
    pub fn merge(mut self, other: Self) -> Self {
        for definition in other.definitions {
            match self
                .definitions
                .iter_mut()
                .find(|d| d.name.eq_ignore_ascii_case(&definition.name))
            {
                Some(existing) => *existing = definition,
                None => self.definitions.push(definition),
            }
        }
        self
    }

    /// Look up a definition by name, ignoring case and surrounding space.
    pub fn get(&self, name: &str) -> Option<&IndexDefinition> {
        let name = name.trim();
        self.definitions
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    /// All definitions.
    pub fn definitions(&self) -> &[IndexDefinition] {
        &self.definitions
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn validate(definition: &IndexDefinition) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidDefinition {
        name: definition.name.clone(),
        reason: reason.to_string(),
    };

    if definition.constituents.is_empty() {
        return Err(invalid("no constituents"));
    }
    if definition.constituents.iter().any(|c| !c.weight.is_finite()) {
        return Err(invalid("non-finite weight"));
    }
    if definition.constituents.iter().any(|c| c.weight < 0.0) {
        return Err(invalid("negative weight"));
    }
    let total = definition.total_weight();
    if total <= 0.0 {
        return Err(invalid("weights sum to zero"));
    }
    if (total - 1.0).abs() > 1e-6 {
        tracing::warn!(index = %definition.name, total, "weights do not sum to 1");
    }
    Ok(())
}
