//! Resource listing
//!
//! The classpath-like primitive discovery walks: given a path, the names of
//! its immediate children.

use beanwise_utils::{BeanwiseError, BeanwiseResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait ResourceProvider {
    /// Child names of `path`. A path that does not exist has no children.
    fn list(&self, path: &str) -> BeanwiseResult<Vec<String>>;

    fn exists(&self, path: &str) -> bool;
}

/// Lists a directory tree on disk, one directory per namespace level.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    base: PathBuf,
}

impl DirectoryResources {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.base.clone(), |dir, segment| dir.join(segment))
    }
}

impl ResourceProvider for DirectoryResources {
    fn list(&self, path: &str) -> BeanwiseResult<Vec<String>> {
        let entries = match std::fs::read_dir(self.resolve(path)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|raw| {
                BeanwiseError::io(format!("Non UTF-8 resource name {:?} under {}", raw, path))
            })?;
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }
}
