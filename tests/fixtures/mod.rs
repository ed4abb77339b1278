//! Fixture domain shared by the end-to-end tests.
//!
//! `beanwise.fixtures.testdomain` holds four testable types next to types
//! discovery must skip. `beanwise.fixtures.broken` holds beans that violate
//! their contracts on purpose.

#![allow(dead_code)]

use beanwise::{
    AccessError, Bean, BeanBuilder, BeanValue, Classpath, FieldDescriptor, TypeDescriptor, TypeKind, Value,
    ValueType, EXCLUDE_BEAN_TESTING, EXCLUDE_FIELD_BEAN_TESTING,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::hash::{Hash, Hasher};

pub const TEST_DOMAIN: &str = "beanwise.fixtures.testdomain";
pub const BROKEN_DOMAIN: &str = "beanwise.fixtures.broken";

pub const TESTABLE: [&str; 4] = [
    "beanwise.fixtures.testdomain.Dto",
    "beanwise.fixtures.testdomain.DtoWithBuilder",
    "beanwise.fixtures.testdomain.ImmutableDto",
    "beanwise.fixtures.testdomain.entity.EntityWithFieldExcluded",
];

fn qualified(package: &str, name: &str) -> String {
    format!("{}.{}", package, name)
}

#[derive(Debug, Default, PartialEq, Hash)]
pub struct Dto {
    integer_field: i32,
    long_field: i64,
    flag: bool,
    text_field: Option<String>,
    date_field: Option<NaiveDate>,
    timestamp: Option<NaiveDateTime>,
}

impl Bean for Dto {
    fn get(&self, field: &str) -> Result<Value, AccessError> {
        match field {
            "integer_field" => Ok(self.integer_field.to_value()),
            "long_field" => Ok(self.long_field.to_value()),
            "flag" => Ok(self.flag.to_value()),
            "text_field" => Ok(self.text_field.to_value()),
            "date_field" => Ok(self.date_field.to_value()),
            "timestamp" => Ok(self.timestamp.to_value()),
            other => Err(AccessError::unknown_field(other)),
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), AccessError> {
        match field {
            "integer_field" => self.integer_field = BeanValue::from_value(value)?,
            "long_field" => self.long_field = BeanValue::from_value(value)?,
            "flag" => self.flag = BeanValue::from_value(value)?,
            "text_field" => self.text_field = BeanValue::from_value(value)?,
            "date_field" => self.date_field = BeanValue::from_value(value)?,
            "timestamp" => self.timestamp = BeanValue::from_value(value)?,
            other => return Err(AccessError::unknown_field(other)),
        }
        Ok(())
    }
}

fn dto() -> TypeDescriptor {
    TypeDescriptor::class(qualified(TEST_DOMAIN, "Dto"))
        .field(FieldDescriptor::new("integer_field", ValueType::Integer))
        .field(FieldDescriptor::new("long_field", ValueType::Long))
        .field(FieldDescriptor::new("flag", ValueType::Boolean))
        .field(FieldDescriptor::new("text_field", ValueType::Text))
        .field(FieldDescriptor::new("date_field", ValueType::LocalDate))
        .field(FieldDescriptor::new("timestamp", ValueType::LocalDateTime))
        .no_args(|| Box::new(Dto::default()))
}

/// A value type the registry knows nothing about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl BeanValue for Currency {
    fn value_type() -> ValueType {
        ValueType::Named("Currency".to_string())
    }

    fn to_value(&self) -> Value {
        Value::Named {
            type_name: "Currency".to_string(),
            text: self.0.clone(),
        }
    }

    fn from_value(value: Value) -> Result<Self, AccessError> {
        match value {
            Value::Named { text, .. } => Ok(Currency(text)),
            other => Err(AccessError::type_mismatch(Self::value_type(), &other)),
        }
    }
}

#[derive(Debug, PartialEq, Hash)]
pub struct DtoWithBuilder {
    name: Option<String>,
    amount: i64,
    currency: Option<Currency>,
}

impl Bean for DtoWithBuilder {
    fn get(&self, field: &str) -> Result<Value, AccessError> {
        match field {
            "name" => Ok(self.name.to_value()),
            "amount" => Ok(self.amount.to_value()),
            "currency" => Ok(self.currency.to_value()),
            other => Err(AccessError::unknown_field(other)),
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), AccessError> {
        match field {
            "name" => self.name = BeanValue::from_value(value)?,
            "amount" => self.amount = BeanValue::from_value(value)?,
            "currency" => self.currency = BeanValue::from_value(value)?,
            other => return Err(AccessError::unknown_field(other)),
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct DtoWithBuilderBuilder {
    name: Option<String>,
    amount: i64,
    currency: Option<Currency>,
}

impl BeanBuilder for DtoWithBuilderBuilder {
    fn with(&mut self, field: &str, value: Value) -> Result<(), AccessError> {
        match field {
            "name" => self.name = BeanValue::from_value(value)?,
            "amount" => self.amount = BeanValue::from_value(value)?,
            "currency" => self.currency = BeanValue::from_value(value)?,
            other => return Err(AccessError::unknown_field(other)),
        }
        Ok(())
    }

    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, AccessError> {
        Ok(Box::new(DtoWithBuilder {
            name: self.name,
            amount: self.amount,
            currency: self.currency,
        }))
    }
}

fn dto_with_builder() -> TypeDescriptor {
    TypeDescriptor::class(qualified(TEST_DOMAIN, "DtoWithBuilder"))
        .field(FieldDescriptor::new("name", ValueType::Text))
        .field(FieldDescriptor::new("amount", ValueType::Long))
        .field(FieldDescriptor::new("currency", Currency::value_type()))
        .builder(|| Box::new(DtoWithBuilderBuilder::default()))
}

/// Every field is set once, through the all-arguments constructor.
#[derive(Debug, PartialEq, Hash)]
pub struct ImmutableDto {
    id: i64,
    code: Option<String>,
}

impl ImmutableDto {
    fn from_values(values: Vec<Value>) -> Result<Box<dyn Bean>, AccessError> {
        let mut values = values.into_iter();
        let id: i64 = BeanValue::from_value(values.next().unwrap_or(Value::Null))?;
        let code: Option<String> = BeanValue::from_value(values.next().unwrap_or(Value::Null))?;
        Ok(Box::new(ImmutableDto { id, code }))
    }
}

impl Bean for ImmutableDto {
    fn get(&self, field: &str) -> Result<Value, AccessError> {
        match field {
            "id" => Ok(self.id.to_value()),
            "code" => Ok(self.code.to_value()),
            other => Err(AccessError::unknown_field(other)),
        }
    }

    fn set(&mut self, field: &str, _value: Value) -> Result<(), AccessError> {
        match field {
            "id" | "code" => Err(AccessError::read_only(field)),
            other => Err(AccessError::unknown_field(other)),
        }
    }
}

fn immutable_dto() -> TypeDescriptor {
    TypeDescriptor::class(qualified(TEST_DOMAIN, "ImmutableDto"))
        .field(FieldDescriptor::new("id", ValueType::Long).immutable())
        .field(FieldDescriptor::new("code", ValueType::Text).immutable())
        .all_args(ImmutableDto::from_values)
}

/// `integer_field` is left out of equality, hashing and rendering.
#[derive(Default)]
pub struct EntityWithFieldExcluded {
    integer_field: i32,
    text_field: Option<String>,
}

impl PartialEq for EntityWithFieldExcluded {
    fn eq(&self, other: &Self) -> bool {
        self.text_field == other.text_field
    }
}

impl Hash for EntityWithFieldExcluded {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text_field.hash(state);
    }
}

impl fmt::Debug for EntityWithFieldExcluded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityWithFieldExcluded")
            .field("text_field", &self.text_field)
            .finish()
    }
}

impl Bean for EntityWithFieldExcluded {
    fn get(&self, field: &str) -> Result<Value, AccessError> {
        match field {
            "integer_field" => Ok(self.integer_field.to_value()),
            "text_field" => Ok(self.text_field.to_value()),
            other => Err(AccessError::unknown_field(other)),
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), AccessError> {
        match field {
            "integer_field" => self.integer_field = BeanValue::from_value(value)?,
            "text_field" => self.text_field = BeanValue::from_value(value)?,
            other => return Err(AccessError::unknown_field(other)),
        }
        Ok(())
    }
}

fn entity_with_field_excluded() -> TypeDescriptor {
    TypeDescriptor::class(qualified(TEST_DOMAIN, "entity.EntityWithFieldExcluded"))
        .field(FieldDescriptor::new("integer_field", ValueType::Integer).marked(EXCLUDE_FIELD_BEAN_TESTING))
        .field(FieldDescriptor::new("text_field", ValueType::Text))
        .no_args(|| Box::new(EntityWithFieldExcluded::default()))
}

/// Types discovery must skip.
fn skipped() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::new(qualified(TEST_DOMAIN, "RecordDto"), TypeKind::Record)
            .field(FieldDescriptor::new("id", ValueType::Long).immutable()),
        TypeDescriptor::new(qualified(TEST_DOMAIN, "entity.AbstractEntity"), TypeKind::Abstract),
        TypeDescriptor::class(qualified(TEST_DOMAIN, "entity.EntityExcluded"))
            .marked(EXCLUDE_BEAN_TESTING)
            .no_args(|| Box::new(Dto::default())),
        TypeDescriptor::new(qualified(TEST_DOMAIN, "Identifiable"), TypeKind::Interface),
        TypeDescriptor::new(qualified(TEST_DOMAIN, "Status"), TypeKind::Enum),
        TypeDescriptor::class(qualified(TEST_DOMAIN, "Dto$Audit")).no_args(|| Box::new(Dto::default())),
    ]
}

/// Equality compares `left` only.
#[derive(Debug, Default)]
pub struct HalfEquals {
    left: i32,
    right: i32,
}

impl PartialEq for HalfEquals {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left
    }
}

impl Hash for HalfEquals {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.left.hash(state);
    }
}

impl Bean for HalfEquals {
    fn get(&self, field: &str) -> Result<Value, AccessError> {
        match field {
            "left" => Ok(self.left.to_value()),
            "right" => Ok(self.right.to_value()),
            other => Err(AccessError::unknown_field(other)),
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), AccessError> {
        match field {
            "left" => self.left = BeanValue::from_value(value)?,
            "right" => self.right = BeanValue::from_value(value)?,
            other => return Err(AccessError::unknown_field(other)),
        }
        Ok(())
    }
}

/// The accessor for `value` hands back a stale copy.
#[derive(Debug, Default, PartialEq, Hash)]
pub struct StaleGetter {
    value: Option<String>,
}

impl Bean for StaleGetter {
    fn get(&self, field: &str) -> Result<Value, AccessError> {
        match field {
            "value" => Ok(Value::Null),
            other => Err(AccessError::unknown_field(other)),
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), AccessError> {
        match field {
            "value" => self.value = BeanValue::from_value(value)?,
            other => return Err(AccessError::unknown_field(other)),
        }
        Ok(())
    }
}

fn broken() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::class(qualified(BROKEN_DOMAIN, "HalfEquals"))
            .field(FieldDescriptor::new("left", ValueType::Integer))
            .field(FieldDescriptor::new("right", ValueType::Integer))
            .no_args(|| Box::new(HalfEquals::default())),
        TypeDescriptor::class(qualified(BROKEN_DOMAIN, "StaleGetter"))
            .field(FieldDescriptor::new("value", ValueType::Text))
            .no_args(|| Box::new(StaleGetter::default())),
        TypeDescriptor::class(qualified(BROKEN_DOMAIN, "Unbuildable"))
            .field(FieldDescriptor::new("value", ValueType::Text)),
    ]
}

pub fn test_domain() -> Vec<TypeDescriptor> {
    let mut types = vec![dto(), dto_with_builder(), immutable_dto(), entity_with_field_excluded()];
    types.extend(skipped());
    types
}

/// Both fixture packages.
pub fn classpath() -> Classpath {
    let mut classpath = Classpath::new();
    classpath.register_all(test_domain()).register_all(broken());
    classpath
}
