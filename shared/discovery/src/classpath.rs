//! Classpath
//!
//! Registry of the bean types available to discovery. It resolves artifact
//! names back to descriptors and also serves as a virtual resource tree, so
//! registered types can be discovered without anything on disk.

use beanwise_models::{TypeDescriptor, NAMESPACE_SEPARATOR, PATH_SEPARATOR};
use beanwise_utils::{BeanwiseError, BeanwiseResult, DEFAULT_ARTIFACT_SUFFIX};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::resources::ResourceProvider;

/// Turns a leaf artifact found in a namespace into a type.
pub trait TypeResolver {
    fn resolve(&self, package: &str, artifact: &str) -> BeanwiseResult<Arc<TypeDescriptor>>;
}

#[derive(Debug, Clone)]
pub struct Classpath {
    types: BTreeMap<String, Arc<TypeDescriptor>>,
    artifact_suffix: String,
}

impl Default for Classpath {
    fn default() -> Self {
        Self::new()
    }
}

impl Classpath {
    pub fn new() -> Self {
        Self::with_suffix(DEFAULT_ARTIFACT_SUFFIX)
    }

    pub fn with_suffix(artifact_suffix: impl Into<String>) -> Self {
        Self {
            types: BTreeMap::new(),
            artifact_suffix: artifact_suffix.into(),
        }
    }

    /// Registers a type, replacing any earlier type of the same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        self
    }

    pub fn register_all<I>(&mut self, descriptors: I) -> &mut Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        for descriptor in descriptors {
            self.register(descriptor);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn artifact_suffix(&self) -> &str {
        &self.artifact_suffix
    }

    /// Qualified type name for an artifact listed under `package`.
    pub fn qualified_name(&self, package: &str, artifact: &str) -> Option<String> {
        let stem = artifact.strip_suffix(self.artifact_suffix.as_str())?;
        let namespace = to_namespace(package);

        if namespace.is_empty() {
            Some(stem.to_string())
        } else {
            Some(format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, stem))
        }
    }
}

impl TypeResolver for Classpath {
    fn resolve(&self, package: &str, artifact: &str) -> BeanwiseResult<Arc<TypeDescriptor>> {
        self.qualified_name(package, artifact)
            .and_then(|name| self.get(&name))
            .ok_or_else(|| BeanwiseError::resolution(artifact, package))
    }
}

impl ResourceProvider for Classpath {
    fn list(&self, path: &str) -> BeanwiseResult<Vec<String>> {
        let namespace = to_namespace(path);
        let mut artifacts = BTreeSet::new();
        let mut children = BTreeSet::new();

        for descriptor in self.types.values() {
            let type_namespace = descriptor.namespace();

            if type_namespace == namespace {
                artifacts.insert(format!("{}{}", descriptor.local_name(), self.artifact_suffix));
            } else if let Some(rest) = child_namespace(type_namespace, &namespace) {
                if let Some(child) = rest.split(NAMESPACE_SEPARATOR).next() {
                    children.insert(child.to_string());
                }
            }
        }

        Ok(artifacts.into_iter().chain(children).collect())
    }

    fn exists(&self, path: &str) -> bool {
        let namespace = to_namespace(path);
        self.types.values().any(|descriptor| {
            let type_namespace = descriptor.namespace();
            type_namespace == namespace || child_namespace(type_namespace, &namespace).is_some()
        })
    }
}

fn to_namespace(path: &str) -> String {
    path.trim_matches(PATH_SEPARATOR)
        .replace(PATH_SEPARATOR, &NAMESPACE_SEPARATOR.to_string())
}

/// The part of `namespace` below `parent`, if `namespace` is strictly inside it.
fn child_namespace<'a>(namespace: &'a str, parent: &str) -> Option<&'a str> {
    if parent.is_empty() {
        return (!namespace.is_empty()).then_some(namespace);
    }

    namespace
        .strip_prefix(parent)
        .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
        .filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanwise_models::TypeKind;

    fn classpath() -> Classpath {
        let mut classpath = Classpath::new();
        classpath.register_all([
            TypeDescriptor::class("com.acme.Order"),
            TypeDescriptor::class("com.acme.Order$Line"),
            TypeDescriptor::new("com.acme.dto.Status", TypeKind::Enum),
            TypeDescriptor::class("com.acme.dto.deep.Item"),
            TypeDescriptor::class("com.acmeish.Other"),
        ]);
        classpath
    }

    #[test]
    fn test_list_artifacts_then_sub_namespaces() {
        let classpath = classpath();
        assert_eq!(
            classpath.list("com/acme").unwrap(),
            vec![
                "Order$Line.class".to_string(),
                "Order.class".to_string(),
                "dto".to_string(),
            ]
        );
        assert_eq!(classpath.list("com").unwrap(), vec!["acme", "acmeish"]);
        assert!(classpath.list("org").unwrap().is_empty());
    }

    #[test]
    fn test_exists() {
        let classpath = classpath();
        assert!(classpath.exists("com"));
        assert!(classpath.exists("com/acme/dto/deep"));
        assert!(!classpath.exists("com/acm"));
        assert!(!classpath.exists("com/acme/Order"));
    }

    #[test]
    fn test_resolve_existing_type() {
        let classpath = classpath();
        let descriptor = classpath.resolve("com/acme/dto", "Status.class").unwrap();
        assert_eq!(descriptor.name, "com.acme.dto.Status");
    }

    #[test]
    fn test_resolve_missing_type_is_an_error() {
        let classpath = classpath();
        let error = classpath.resolve("package", "NonExistentClass.class").unwrap_err();
        assert_eq!(
            error,
            BeanwiseError::resolution("NonExistentClass.class", "package")
        );
        assert_eq!(error.error_code(), "RESOLUTION_ERROR");
    }

    #[test]
    fn test_resolve_artifact_without_suffix_is_an_error() {
        let classpath = classpath();
        assert!(classpath.resolve("com/acme", "Order").is_err());
    }
}
