//! Suite-level scan configuration and verification policy.

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Separator between namespace levels in a resource path.
pub const PATH_SEPARATOR: char = '/';

/// What a suite asks to be scanned: the configuration-carrying marker's
/// attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ScanConfiguration {
    /// Root namespace, dotted (`com.acme`) or as a path (`com/acme`). Blank
    /// means "the suite's own namespace".
    #[validate(custom = "validate_namespace")]
    pub source_root_path: String,
    /// Sub-namespaces joined onto the root; empty scans the root itself.
    #[validate(custom = "validate_packages")]
    pub packages_to_scan: Vec<String>,
}

impl ScanConfiguration {
    pub fn new(source_root_path: impl Into<String>) -> Self {
        Self {
            source_root_path: source_root_path.into(),
            packages_to_scan: Vec::new(),
        }
    }

    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages_to_scan = packages.into_iter().map(Into::into).collect();
        self
    }

    /// The root as a resource path (`com.acme` becomes `com/acme`).
    pub fn root_path(&self) -> String {
        self.source_root_path.trim().replace('.', "/")
    }

    /// One scan root per configured package, or the root alone. Dotted
    /// packages are nested the same way as the root.
    pub fn scan_roots(&self) -> Vec<String> {
        let root = self.root_path();

        if self.packages_to_scan.is_empty() {
            return vec![root];
        }

        self.packages_to_scan
            .iter()
            .map(|package| format!("{}{}{}", root, PATH_SEPARATOR, package.trim().replace('.', "/")))
            .collect()
    }

    /// Same configuration with a blank root replaced by `namespace`.
    pub fn rooted_at_default(&self, namespace: &str) -> Self {
        if !self.source_root_path.trim().is_empty() {
            return self.clone();
        }

        Self {
            source_root_path: namespace.to_string(),
            packages_to_scan: self.packages_to_scan.clone(),
        }
    }
}

/// How immutable fields are treated by the contract checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Immutable fields are excluded from every check.
    #[default]
    Strict,
    /// Only explicitly marked fields are excluded.
    Lenient,
}

const NAMESPACE_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*([./][A-Za-z_][A-Za-z0-9_]*)*$";

fn validate_namespace(namespace: &str) -> Result<(), ValidationError> {
    let namespace = namespace.trim();
    if namespace.is_empty() {
        return Ok(());
    }

    let pattern = Regex::new(NAMESPACE_PATTERN).map_err(|_| ValidationError::new("pattern"))?;
    if !pattern.is_match(namespace) {
        return Err(ValidationError::new("namespace"));
    }
    Ok(())
}

fn validate_packages(packages: &[String]) -> Result<(), ValidationError> {
    let pattern = Regex::new(NAMESPACE_PATTERN).map_err(|_| ValidationError::new("pattern"))?;
    for package in packages {
        if !pattern.is_match(package) {
            return Err(ValidationError::new("package"));
        }
    }
    Ok(())
}
