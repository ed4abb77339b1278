//! # Beanwise Discovery
//!
//! Finds the bean types a suite should verify.
//!
//! - **resources**: listing of namespace paths (directories or the classpath)
//! - **classpath**: registry of known types, usable as a virtual resource tree
//! - **scanner**: worklist walk over a namespace subtree
//! - **eligibility**: drops interfaces, enums, records, abstract, nested and
//!   excluded types
//! - **suite**: the suite-side scan configuration
//! - **driver**: ties the above together

pub mod classpath;
pub mod driver;
pub mod eligibility;
pub mod resources;
pub mod scanner;
pub mod suite;

pub use classpath::{Classpath, TypeResolver};
pub use driver::Discovery;
pub use eligibility::{EligibilityFilter, Rejection};
pub use resources::{DirectoryResources, ResourceProvider};
pub use scanner::{leaf_artifacts, sub_namespaces, CandidateLeaf, NamespaceLevel, NamespaceScanner};
pub use suite::BeanSuite;
