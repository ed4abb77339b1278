//! The instance-level seam between the contract checks and a bean type.
//!
//! Rust has no runtime reflection, so a bean exposes its fields by name
//! through [`Bean`]. Equality, hashing and string rendering are *not*
//! implemented by the bean author for this crate: they come from the type's
//! own `PartialEq`, `Hash` and `Debug` implementations via the blanket
//! [`BeanObject`] impl, which is exactly what the checks are verifying.

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::value::{Value, ValueType};

/// Errors raised while reading or writing a bean field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Field {field} has no mutator")]
    ReadOnly { field: String },

    #[error("Expected a {expected} value, got {actual:?}")]
    TypeMismatch { expected: ValueType, actual: Value },

    #[error("Cannot build instance: {message}")]
    Construction { message: String },
}

impl AccessError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub fn read_only(field: impl Into<String>) -> Self {
        Self::ReadOnly {
            field: field.into(),
        }
    }

    pub fn type_mismatch(expected: ValueType, actual: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            actual: actual.clone(),
        }
    }

    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }
}

/// Object-level behaviour derived from the bean type's standard trait impls.
pub trait BeanObject: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    /// `PartialEq` of the concrete type; `false` when `other` is another type.
    fn bean_eq(&self, other: &dyn Bean) -> bool;

    /// `Hash` of the concrete type fed into a `DefaultHasher`.
    fn bean_hash(&self) -> u64;

    /// The `Debug` rendering of the concrete type.
    fn render(&self) -> String;
}

impl<T> BeanObject for T
where
    T: PartialEq + Hash + Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn bean_eq(&self, other: &dyn Bean) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn bean_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn render(&self) -> String {
        format!("{:?}", self)
    }
}

/// Field access by name: the accessor/mutator pair of every bean property.
pub trait Bean: BeanObject {
    fn get(&self, field: &str) -> Result<Value, AccessError>;

    /// Mutator. Immutable fields answer [`AccessError::ReadOnly`].
    fn set(&mut self, field: &str, value: Value) -> Result<(), AccessError>;
}

/// A builder-pattern constructor for beans without a no-args constructor.
pub trait BeanBuilder {
    fn with(&mut self, field: &str, value: Value) -> Result<(), AccessError>;

    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, AccessError>;
}
