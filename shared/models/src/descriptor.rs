//! Type-level metadata for discovered beans.
//!
//! A [`TypeDescriptor`] is the declarative stand-in for runtime type
//! introspection: kind, markers, field list and instantiation strategies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::bean::{AccessError, Bean, BeanBuilder};
use crate::marker::MarkerId;
use crate::value::{Value, ValueType};

/// Separator between namespace segments in a qualified type name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator between an enclosing type and a nested type in a local name.
pub const NESTED_SEPARATOR: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    /// Fixed-shape aggregate whose components are set once at construction.
    Record,
    Abstract,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
            Self::Enum => write!(f, "enum"),
            Self::Record => write!(f, "record"),
            Self::Abstract => write!(f, "abstract"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub value_type: ValueType,
    pub immutable: bool,
    pub markers: BTreeSet<MarkerId>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            immutable: false,
            markers: BTreeSet::new(),
        }
    }

    /// Marks the field as having no mutator.
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn marked(mut self, marker: impl Into<MarkerId>) -> Self {
        self.markers.insert(marker.into());
        self
    }

    pub fn has_marker(&self, marker: &MarkerId) -> bool {
        self.markers.contains(marker)
    }
}

pub type NoArgsConstructor = fn() -> Box<dyn Bean>;
pub type AllArgsConstructor = fn(Vec<Value>) -> Result<Box<dyn Bean>, AccessError>;
pub type BuilderFactory = fn() -> Box<dyn BeanBuilder>;

/// The ways a bean type can be instantiated, tried in declaration order of
/// the fields below.
#[derive(Clone, Copy, Default)]
pub struct Instantiation {
    pub no_args: Option<NoArgsConstructor>,
    pub builder: Option<BuilderFactory>,
    /// Receives one value per field, in field declaration order.
    pub all_args: Option<AllArgsConstructor>,
}

impl Instantiation {
    pub fn is_empty(&self) -> bool {
        self.no_args.is_none() && self.builder.is_none() && self.all_args.is_none()
    }
}

impl fmt::Debug for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instantiation")
            .field("no_args", &self.no_args.is_some())
            .field("builder", &self.builder.is_some())
            .field("all_args", &self.all_args.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Fully qualified name, e.g. `com.acme.dto.Order` or `com.acme.dto.Order$Line`.
    pub name: String,
    pub kind: TypeKind,
    pub markers: BTreeSet<MarkerId>,
    pub fields: Vec<FieldDescriptor>,
    pub instantiation: Instantiation,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            markers: BTreeSet::new(),
            fields: Vec::new(),
            instantiation: Instantiation::default(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn marked(mut self, marker: impl Into<MarkerId>) -> Self {
        self.markers.insert(marker.into());
        self
    }

    pub fn no_args(mut self, constructor: NoArgsConstructor) -> Self {
        self.instantiation.no_args = Some(constructor);
        self
    }

    pub fn builder(mut self, factory: BuilderFactory) -> Self {
        self.instantiation.builder = Some(factory);
        self
    }

    pub fn all_args(mut self, constructor: AllArgsConstructor) -> Self {
        self.instantiation.all_args = Some(constructor);
        self
    }

    /// Namespace part of the name (`com.acme.dto`), empty for root types.
    pub fn namespace(&self) -> &str {
        self.name
            .rfind(NAMESPACE_SEPARATOR)
            .map_or("", |idx| &self.name[..idx])
    }

    /// Name relative to the namespace, including enclosing types (`Order$Line`).
    pub fn local_name(&self) -> &str {
        self.name
            .rfind(NAMESPACE_SEPARATOR)
            .map_or(self.name.as_str(), |idx| &self.name[idx + 1..])
    }

    /// Innermost name (`Line` for `Order$Line`).
    pub fn simple_name(&self) -> &str {
        let local = self.local_name();
        local
            .rfind(NESTED_SEPARATOR)
            .map_or(local, |idx| &local[idx + 1..])
    }

    /// Nested, local and anonymous types carry the nested separator in their
    /// local name; top-level types never do.
    pub fn is_nested_or_local(&self) -> bool {
        self.local_name().contains(NESTED_SEPARATOR)
    }

    pub fn has_marker(&self, marker: &MarkerId) -> bool {
        self.markers.contains(marker)
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Types are identified by their qualified name.
impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_parts() {
        let descriptor = TypeDescriptor::class("com.acme.dto.Order");
        assert_eq!(descriptor.namespace(), "com.acme.dto");
        assert_eq!(descriptor.local_name(), "Order");
        assert_eq!(descriptor.simple_name(), "Order");
        assert!(!descriptor.is_nested_or_local());
    }

    #[test]
    fn test_nested_detection() {
        let nested = TypeDescriptor::class("com.acme.dto.Order$Line");
        assert_eq!(nested.simple_name(), "Line");
        assert!(nested.is_nested_or_local());

        let anonymous = TypeDescriptor::class("com.acme.dto.Order$1");
        assert!(anonymous.is_nested_or_local());
    }

    #[test]
    fn test_root_namespace() {
        let descriptor = TypeDescriptor::class("Order");
        assert_eq!(descriptor.namespace(), "");
        assert_eq!(descriptor.local_name(), "Order");
    }

    #[test]
    fn test_builder_style_declaration() {
        let descriptor = TypeDescriptor::class("com.acme.Order")
            .field(FieldDescriptor::new("id", ValueType::Long).immutable())
            .field(FieldDescriptor::new("note", ValueType::Text).marked("Skip"))
            .marked("Audit");

        assert!(descriptor.instantiation.is_empty());
        assert!(descriptor.field_named("id").unwrap().immutable);
        assert!(descriptor
            .field_named("note")
            .unwrap()
            .has_marker(&MarkerId::from("Skip")));
        assert!(descriptor.has_marker(&MarkerId::from("Audit")));
    }
}
