use beanwise_models::{AccessError, MarkerError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BeanwiseError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Cannot find type: {artifact} in specified package: {package}")]
    Resolution { artifact: String, package: String },

    #[error("Cannot find marker {marker}")]
    UnknownMarker { marker: String },

    #[error("Marker misuse: {marker} is a {actual}-level marker, expected a {expected}-level marker")]
    MarkerMisuse {
        marker: String,
        expected: String,
        actual: String,
    },

    #[error("Root namespace not found: {root}")]
    RootNotFound { root: String },

    #[error("Contract violation: {type_name} failed {count} check(s): {summary}")]
    ContractViolation {
        type_name: String,
        count: usize,
        summary: String,
    },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BeanwiseError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The suite lacks the marker that carries its scan configuration.
    pub fn missing_marker(suite: impl AsRef<str>, marker: impl AsRef<str>) -> Self {
        Self::configuration(format!(
            "{{ {} }} must be annotated with {{ {} }}. Please provide it or disable the test.",
            suite.as_ref(),
            marker.as_ref()
        ))
    }

    pub fn resolution(artifact: impl Into<String>, package: impl Into<String>) -> Self {
        Self::Resolution {
            artifact: artifact.into(),
            package: package.into(),
        }
    }

    pub fn root_not_found(root: impl Into<String>) -> Self {
        Self::RootNotFound { root: root.into() }
    }

    pub fn contract_violation(
        type_name: impl Into<String>,
        count: usize,
        summary: impl Into<String>,
    ) -> Self {
        Self::ContractViolation {
            type_name: type_name.into(),
            count,
            summary: summary.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Resolution { .. } => "RESOLUTION_ERROR",
            Self::UnknownMarker { .. } => "UNKNOWN_MARKER",
            Self::MarkerMisuse { .. } => "MARKER_MISUSE",
            Self::RootNotFound { .. } => "ROOT_NOT_FOUND",
            Self::ContractViolation { .. } => "CONTRACT_VIOLATION",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Precondition defects abort the run; contract violations are reported
    /// per type and do not.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ContractViolation { .. })
    }
}

pub type BeanwiseResult<T> = Result<T, BeanwiseError>;

impl From<MarkerError> for BeanwiseError {
    fn from(error: MarkerError) -> Self {
        match error {
            MarkerError::Unknown { marker } => Self::UnknownMarker { marker },
            MarkerError::Misuse {
                marker,
                expected,
                actual,
            } => Self::MarkerMisuse {
                marker,
                expected: expected.to_string(),
                actual: actual.to_string(),
            },
        }
    }
}

impl From<AccessError> for BeanwiseError {
    fn from(error: AccessError) -> Self {
        Self::internal(error.to_string())
    }
}

impl From<std::io::Error> for BeanwiseError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<config::ConfigError> for BeanwiseError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}
