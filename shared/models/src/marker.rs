//! Named markers: the declarative opt-outs attached to types and fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Carries the scan configuration of a bean suite.
pub const ENABLE_AUTOMATED_BEAN_TESTING: &str = "EnableAutomatedBeanTesting";
/// Excludes a type from discovery.
pub const EXCLUDE_BEAN_TESTING: &str = "ExcludeBeanTesting";
/// Excludes a field from the equality, hash and string checks.
pub const EXCLUDE_FIELD_BEAN_TESTING: &str = "ExcludeFieldBeanTesting";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for MarkerId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerTarget {
    Type,
    Field,
}

impl fmt::Display for MarkerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Field => write!(f, "field"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkerError {
    #[error("Cannot find marker {marker}")]
    Unknown { marker: String },

    #[error("{marker} is a {actual}-level marker, not a {expected}-level marker")]
    Misuse {
        marker: String,
        expected: MarkerTarget,
        actual: MarkerTarget,
    },
}

/// The known markers and where each may be applied.
#[derive(Debug, Clone, Default)]
pub struct MarkerCatalog {
    markers: BTreeMap<MarkerId, MarkerTarget>,
}

impl MarkerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the three built-in markers.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.declare(ENABLE_AUTOMATED_BEAN_TESTING, MarkerTarget::Type);
        catalog.declare(EXCLUDE_BEAN_TESTING, MarkerTarget::Type);
        catalog.declare(EXCLUDE_FIELD_BEAN_TESTING, MarkerTarget::Field);
        catalog
    }

    /// Declares (or redeclares) a marker.
    pub fn declare(&mut self, marker: impl Into<MarkerId>, target: MarkerTarget) {
        self.markers.insert(marker.into(), target);
    }

    pub fn target_of(&self, marker: &str) -> Option<MarkerTarget> {
        self.markers.get(&MarkerId::from(marker)).copied()
    }

    /// Resolves a marker name for use at the given level.
    pub fn resolve(&self, marker: &str, expected: MarkerTarget) -> Result<MarkerId, MarkerError> {
        let actual = self.target_of(marker).ok_or_else(|| MarkerError::Unknown {
            marker: marker.to_string(),
        })?;

        if actual != expected {
            return Err(MarkerError::Misuse {
                marker: marker.to_string(),
                expected,
                actual,
            });
        }

        Ok(MarkerId::from(marker))
    }
}
