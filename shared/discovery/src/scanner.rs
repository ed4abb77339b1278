//! Namespace scanner
//!
//! Walks the namespace tree below a root with an explicit worklist. Each
//! listed name is either a leaf artifact (it ends with the artifact suffix)
//! or a sub-namespace to visit next. Child paths are strictly longer than
//! their parent, so no path is visited twice.

use beanwise_models::PATH_SEPARATOR;
use beanwise_utils::BeanwiseResult;
use std::collections::BTreeSet;

use crate::resources::ResourceProvider;

/// An unresolved artifact and the namespace path it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateLeaf {
    pub package: String,
    pub artifact: String,
}

impl CandidateLeaf {
    pub fn new(package: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            artifact: artifact.into(),
        }
    }
}

/// The artifacts found directly under one namespace path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceLevel {
    pub path: String,
    pub leaves: BTreeSet<CandidateLeaf>,
}

pub struct NamespaceScanner<'a> {
    resources: &'a dyn ResourceProvider,
    artifact_suffix: &'a str,
}

impl<'a> NamespaceScanner<'a> {
    pub fn new(resources: &'a dyn ResourceProvider, artifact_suffix: &'a str) -> Self {
        Self {
            resources,
            artifact_suffix,
        }
    }

    /// Every level of the subtree below `root`, including empty ones.
    pub fn levels(&self, root: &str) -> BeanwiseResult<Vec<NamespaceLevel>> {
        let mut levels = Vec::new();
        let mut pending = vec![root.to_string()];

        while let Some(path) = pending.pop() {
            let lines = self.resources.list(&path)?;
            tracing::trace!(path = %path, entries = lines.len(), "Listed namespace");

            pending.extend(sub_namespaces(&lines, &path, self.artifact_suffix));
            levels.push(NamespaceLevel {
                leaves: leaf_artifacts(&lines, &path, self.artifact_suffix),
                path,
            });
        }

        Ok(levels)
    }

    /// All leaf artifacts below `root`.
    pub fn scan(&self, root: &str) -> BeanwiseResult<BTreeSet<CandidateLeaf>> {
        Ok(self
            .levels(root)?
            .into_iter()
            .flat_map(|level| level.leaves)
            .collect())
    }
}

/// Names that are not artifacts, joined onto `root`. Repeated names collapse.
pub fn sub_namespaces(lines: &[String], root: &str, artifact_suffix: &str) -> BTreeSet<String> {
    lines
        .iter()
        .filter(|line| !line.ends_with(artifact_suffix))
        .map(|name| format!("{}{}{}", root, PATH_SEPARATOR, name))
        .collect()
}

pub fn leaf_artifacts(lines: &[String], package: &str, artifact_suffix: &str) -> BTreeSet<CandidateLeaf> {
    lines
        .iter()
        .filter(|line| line.ends_with(artifact_suffix))
        .map(|line| CandidateLeaf::new(package, line.as_str()))
        .collect()
}
