//! # Beanwise
//!
//! Automated structural contract testing for data-holder types. A suite
//! names a root namespace; every testable type below it is checked for a
//! working constructor, accessor round-trips, equality and hash contracts
//! and a string rendering that shows its fields.
//!
//! ```no_run
//! use beanwise::{AppConfig, BeanSuite, BeanTestHarness, Classpath, ScanConfiguration};
//!
//! let classpath = Classpath::new();
//! let harness = BeanTestHarness::new(AppConfig::default(), classpath)?;
//! let suite = BeanSuite::new("com.acme.BeanTest").enable(ScanConfiguration::new("com.acme.dto"));
//! harness.run_suite(&suite)?.into_result()?;
//! # Ok::<(), beanwise::BeanwiseError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use beanwise_contracts::{
    instantiate, ContractCheck, ContractVerifier, ContractViolation, GeneratorRegistry, VerificationReport,
};
pub use beanwise_discovery::{
    BeanSuite, Classpath, DirectoryResources, Discovery, ResourceProvider, TypeResolver,
};
pub use beanwise_models::*;
pub use beanwise_utils::{
    init_logging, validate_settings, AppConfig, BeanwiseError, BeanwiseResult, GeneratorSettings,
    LoggingConfig, ScanSettings, VerificationSettings,
};

use beanwise_utils::log_info;

/// Discovery and verification over one classpath.
#[derive(Debug)]
pub struct BeanTestHarness {
    config: AppConfig,
    classpath: Classpath,
    markers: MarkerCatalog,
    registry: GeneratorRegistry,
}

impl BeanTestHarness {
    pub fn new(config: AppConfig, classpath: Classpath) -> BeanwiseResult<Self> {
        validate_settings(&config)?;
        if classpath.artifact_suffix() != config.scan.artifact_suffix {
            return Err(BeanwiseError::configuration(format!(
                "Classpath lists '{}' artifacts but scanning expects '{}'",
                classpath.artifact_suffix(),
                config.scan.artifact_suffix
            )));
        }

        let registry = GeneratorRegistry::new(&config.generators);

        Ok(Self {
            config,
            classpath,
            markers: MarkerCatalog::standard(),
            registry,
        })
    }

    /// Loads configuration from files and the environment.
    pub fn from_environment(classpath: Classpath) -> anyhow::Result<Self> {
        let config = AppConfig::load()?;
        Ok(Self::new(config, classpath)?)
    }

    pub fn with_markers(mut self, markers: MarkerCatalog) -> Self {
        self.markers = markers;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    /// For registering custom generators before any verification runs.
    pub fn registry_mut(&mut self) -> &mut GeneratorRegistry {
        &mut self.registry
    }

    /// Testable types for `suite`, found in the classpath itself.
    pub fn provide_candidates(&self, suite: &BeanSuite) -> BeanwiseResult<Vec<Arc<TypeDescriptor>>> {
        self.provide_candidates_in(&self.classpath, suite)
    }

    /// Like [`provide_candidates`](Self::provide_candidates), but walks
    /// `resources` and only resolves the listed artifacts in the classpath.
    pub fn provide_candidates_in(
        &self,
        resources: &dyn ResourceProvider,
        suite: &BeanSuite,
    ) -> BeanwiseResult<Vec<Arc<TypeDescriptor>>> {
        Discovery::new(resources, &self.classpath, &self.markers, &self.config.scan).provide_candidates(suite)
    }

    pub fn verify(&self, descriptor: &TypeDescriptor) -> BeanwiseResult<VerificationReport> {
        Ok(self.verifier()?.verify(descriptor))
    }

    /// Discovers the suite's types and verifies each one. Only precondition
    /// failures are returned as errors; contract violations end up in the
    /// report.
    pub fn run_suite(&self, suite: &BeanSuite) -> BeanwiseResult<SuiteReport> {
        let candidates = self.provide_candidates(suite)?;
        let verifier = self.verifier()?;
        let total = candidates.len();

        let reports = candidates
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                log_info!("{}/{} - Testing bean {}", index + 1, total, descriptor.name);
                verifier.verify(descriptor)
            })
            .collect();

        Ok(SuiteReport {
            suite: suite.name.clone(),
            mode: self.config.verification.mode,
            reports,
        })
    }

    fn verifier(&self) -> BeanwiseResult<ContractVerifier<'_>> {
        ContractVerifier::new(
            &self.registry,
            &self.markers,
            &self.config.scan,
            &self.config.verification,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite: String,
    pub mode: VerificationMode,
    pub reports: Vec<VerificationReport>,
}

impl SuiteReport {
    pub fn is_passing(&self) -> bool {
        self.reports.iter().all(VerificationReport::is_passing)
    }

    pub fn failing(&self) -> impl Iterator<Item = &VerificationReport> {
        self.reports.iter().filter(|report| !report.is_passing())
    }

    pub fn tested_types(&self) -> Vec<&str> {
        self.reports.iter().map(|report| report.type_name.as_str()).collect()
    }

    /// The first failing type as an error.
    pub fn into_result(self) -> BeanwiseResult<()> {
        self.reports
            .into_iter()
            .map(VerificationReport::into_result)
            .collect()
    }
}
