//! Field values exchanged between the contract checks and the beans under test.
//!
//! Beans expose their fields as [`Value`]s so the checks can generate, assign
//! and compare values without knowing the concrete Rust field types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bean::AccessError;

/// The declared type of a bean field, used as the key of the generator registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueType {
    Integer,
    Long,
    Double,
    Boolean,
    Text,
    LocalDate,
    LocalDateTime,
    /// A user defined value type, identified by name.
    Named(String),
}

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
    LocalDate(NaiveDate),
    LocalDateTime(NaiveDateTime),
    Named { type_name: String, text: String },
}

impl Value {
    /// A default-like value for the given type, used when a bean can only be
    /// built through an all-arguments constructor.
    pub fn default_for(value_type: &ValueType) -> Self {
        match value_type {
            ValueType::Integer => Self::Integer(0),
            ValueType::Long => Self::Long(0),
            ValueType::Double => Self::Double(0.0),
            ValueType::Boolean => Self::Boolean(false),
            ValueType::Text => Self::Text(String::new()),
            ValueType::LocalDate => Self::LocalDate(NaiveDate::default()),
            ValueType::LocalDateTime => Self::LocalDateTime(NaiveDateTime::default()),
            ValueType::Named(name) => Self::Named {
                type_name: name.clone(),
                text: String::new(),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The type of this value, `None` for [`Value::Null`].
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(ValueType::Integer),
            Self::Long(_) => Some(ValueType::Long),
            Self::Double(_) => Some(ValueType::Double),
            Self::Boolean(_) => Some(ValueType::Boolean),
            Self::Text(_) => Some(ValueType::Text),
            Self::LocalDate(_) => Some(ValueType::LocalDate),
            Self::LocalDateTime(_) => Some(ValueType::LocalDateTime),
            Self::Named { type_name, .. } => Some(ValueType::Named(type_name.clone())),
        }
    }
}

/// Renders a value the way a derived `Debug` implementation shows it inside a
/// struct, minus string quoting. The string representation check looks for
/// this rendering in the bean's output.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "None"),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{:?}", v),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Text(v) => write!(f, "{}", v),
            Self::LocalDate(v) => write!(f, "{:?}", v),
            Self::LocalDateTime(v) => write!(f, "{:?}", v),
            Self::Named { text, .. } => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "i32"),
            Self::Long => write!(f, "i64"),
            Self::Double => write!(f, "f64"),
            Self::Boolean => write!(f, "bool"),
            Self::Text => write!(f, "String"),
            Self::LocalDate => write!(f, "NaiveDate"),
            Self::LocalDateTime => write!(f, "NaiveDateTime"),
            Self::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Conversion between a concrete field type and [`Value`].
pub trait BeanValue: Sized {
    fn value_type() -> ValueType;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, AccessError>;
}

macro_rules! impl_bean_value {
    ($ty:ty, $variant:ident) => {
        impl BeanValue for $ty {
            fn value_type() -> ValueType {
                ValueType::$variant
            }

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: Value) -> Result<Self, AccessError> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(AccessError::type_mismatch(ValueType::$variant, &other)),
                }
            }
        }
    };
}

impl_bean_value!(i32, Integer);
impl_bean_value!(i64, Long);
impl_bean_value!(f64, Double);
impl_bean_value!(bool, Boolean);
impl_bean_value!(String, Text);
impl_bean_value!(NaiveDate, LocalDate);
impl_bean_value!(NaiveDateTime, LocalDateTime);

impl<T: BeanValue> BeanValue for Option<T> {
    fn value_type() -> ValueType {
        T::value_type()
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
