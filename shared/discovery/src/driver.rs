//! Discovery driver
//!
//! Runs the scanner and the eligibility filter over every configured root
//! and collects the testable types. Types reachable from several roots are
//! reported once.

use beanwise_models::{MarkerCatalog, ScanConfiguration, TypeDescriptor};
use beanwise_utils::{log_debug, log_info, BeanwiseError, BeanwiseResult, ScanSettings};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::classpath::TypeResolver;
use crate::eligibility::EligibilityFilter;
use crate::resources::ResourceProvider;
use crate::scanner::NamespaceScanner;
use crate::suite::BeanSuite;

pub struct Discovery<'a> {
    resources: &'a dyn ResourceProvider,
    types: &'a dyn TypeResolver,
    markers: &'a MarkerCatalog,
    settings: &'a ScanSettings,
}

impl<'a> Discovery<'a> {
    pub fn new(
        resources: &'a dyn ResourceProvider,
        types: &'a dyn TypeResolver,
        markers: &'a MarkerCatalog,
        settings: &'a ScanSettings,
    ) -> Self {
        Self {
            resources,
            types,
            markers,
            settings,
        }
    }

    /// Testable types for a suite, sorted by name.
    pub fn provide_candidates(&self, suite: &BeanSuite) -> BeanwiseResult<Vec<Arc<TypeDescriptor>>> {
        let configuration = suite.required_configuration()?;
        self.discover(&configuration)
    }

    pub fn discover(&self, configuration: &ScanConfiguration) -> BeanwiseResult<Vec<Arc<TypeDescriptor>>> {
        let root = configuration.root_path();
        if !self.resources.exists(&root) {
            return Err(BeanwiseError::root_not_found(root));
        }

        let filter = EligibilityFilter::new(self.types, self.markers, &self.settings.type_exclusion_marker)?;
        let scanner = NamespaceScanner::new(self.resources, &self.settings.artifact_suffix);
        let mut candidates = BTreeMap::new();

        for scan_root in configuration.scan_roots() {
            log_info!("Scanning {}", scan_root.replace('/', "."));

            for level in scanner.levels(&scan_root)? {
                let testable = filter.resolve(&level.leaves)?;
                log_debug!(
                    "{}: {} artifacts, {} testable",
                    level.path,
                    level.leaves.len(),
                    testable.len()
                );

                for descriptor in testable {
                    candidates.insert(descriptor.name.clone(), descriptor);
                }
            }
        }

        log_info!("Found {} testable types", candidates.len());
        Ok(candidates.into_values().collect())
    }
}
