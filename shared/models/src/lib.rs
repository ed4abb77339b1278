//! # Beanwise Data Model
//!
//! This crate contains the data model shared by discovery and contract
//! verification. Types under test are described declaratively instead of
//! through runtime reflection.
//!
//! ## Key Models
//!
//! - **TypeDescriptor**: qualified name, kind, markers, fields and
//!   instantiation strategies of one bean type
//! - **FieldDescriptor**: name, value type, mutability and markers of one field
//! - **Bean / BeanBuilder**: instance-level field access
//! - **Value / ValueType / BeanValue**: dynamically typed field values
//! - **MarkerCatalog**: known markers and the level each applies to
//! - **ScanConfiguration**: which namespaces a bean suite scans

pub mod bean;
pub mod descriptor;
pub mod marker;
pub mod scan;
pub mod value;


pub use bean::*;
pub use descriptor::*;
pub use marker::{
    MarkerCatalog, MarkerError, MarkerId, MarkerTarget, ENABLE_AUTOMATED_BEAN_TESTING,
    EXCLUDE_BEAN_TESTING, EXCLUDE_FIELD_BEAN_TESTING,
};
pub use scan::*;
pub use value::*;
