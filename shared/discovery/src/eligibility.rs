//! Eligibility filter
//!
//! Resolves leaf artifacts to types and keeps the testable ones: concrete,
//! top-level classes without the type-level exclusion marker.

use beanwise_models::{MarkerCatalog, MarkerId, MarkerTarget, TypeDescriptor, TypeKind};
use beanwise_utils::{log_debug, BeanwiseResult};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::classpath::TypeResolver;
use crate::scanner::CandidateLeaf;

/// Why a resolved type is not testable, in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Interface,
    Enumeration,
    Record,
    Abstract,
    Nested,
    Excluded,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface => write!(f, "interface"),
            Self::Enumeration => write!(f, "enumeration"),
            Self::Record => write!(f, "record"),
            Self::Abstract => write!(f, "abstract type"),
            Self::Nested => write!(f, "nested or local type"),
            Self::Excluded => write!(f, "excluded by marker"),
        }
    }
}

pub struct EligibilityFilter<'a> {
    types: &'a dyn TypeResolver,
    exclusion_marker: MarkerId,
}

impl<'a> EligibilityFilter<'a> {
    /// Fails when `exclusion_marker` is unknown or is not a type-level marker.
    pub fn new(
        types: &'a dyn TypeResolver,
        markers: &MarkerCatalog,
        exclusion_marker: &str,
    ) -> BeanwiseResult<Self> {
        let exclusion_marker = markers.resolve(exclusion_marker, MarkerTarget::Type)?;
        Ok(Self {
            types,
            exclusion_marker,
        })
    }

    pub fn rejection(&self, descriptor: &TypeDescriptor) -> Option<Rejection> {
        match descriptor.kind {
            TypeKind::Interface => return Some(Rejection::Interface),
            TypeKind::Enum => return Some(Rejection::Enumeration),
            TypeKind::Record => return Some(Rejection::Record),
            TypeKind::Abstract => return Some(Rejection::Abstract),
            TypeKind::Class => {}
        }

        if descriptor.is_nested_or_local() {
            return Some(Rejection::Nested);
        }

        if descriptor.has_marker(&self.exclusion_marker) {
            return Some(Rejection::Excluded);
        }

        None
    }

    pub fn is_testable(&self, descriptor: &TypeDescriptor) -> bool {
        self.rejection(descriptor).is_none()
    }

    /// Resolves every leaf and keeps the testable types. Any leaf that does
    /// not resolve fails the whole level.
    pub fn resolve(&self, leaves: &BTreeSet<CandidateLeaf>) -> BeanwiseResult<Vec<Arc<TypeDescriptor>>> {
        let mut testable = Vec::new();

        for leaf in leaves {
            let descriptor = self.types.resolve(&leaf.package, &leaf.artifact)?;

            match self.rejection(&descriptor) {
                Some(reason) => {
                    log_debug!("Skipping {}: {}", descriptor.name, reason);
                }
                None => testable.push(descriptor),
            }
        }

        Ok(testable)
    }
}
