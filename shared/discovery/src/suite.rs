//! Bean suites: the test-side owner of a scan configuration.

use beanwise_models::{ScanConfiguration, ENABLE_AUTOMATED_BEAN_TESTING, NAMESPACE_SEPARATOR};
use beanwise_utils::{validate_model, BeanwiseError, BeanwiseResult};

/// A test suite that asks for automated bean testing. The optional
/// configuration plays the role of the configuration-carrying marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanSuite {
    pub name: String,
    configuration: Option<ScanConfiguration>,
}

impl BeanSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configuration: None,
        }
    }

    /// Attaches the scan configuration.
    pub fn enable(mut self, configuration: ScanConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    pub fn namespace(&self) -> &str {
        self.name
            .rfind(NAMESPACE_SEPARATOR)
            .map_or("", |idx| &self.name[..idx])
    }

    pub fn is_enabled(&self) -> bool {
        self.configuration.is_some()
    }

    /// The validated scan configuration, with a blank root replaced by the
    /// suite's own namespace.
    pub fn required_configuration(&self) -> BeanwiseResult<ScanConfiguration> {
        let configuration = self
            .configuration
            .as_ref()
            .ok_or_else(|| BeanwiseError::missing_marker(&self.name, ENABLE_AUTOMATED_BEAN_TESTING))?;

        validate_model(configuration)?;
        Ok(configuration.rooted_at_default(self.namespace()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_names_suite_and_marker() {
        let suite = BeanSuite::new("acme.beans.PlainTest");
        let error = suite.required_configuration().unwrap_err();

        assert_eq!(error.error_code(), "CONFIGURATION_ERROR");
        assert_eq!(
            error.to_string(),
            "Configuration error: { acme.beans.PlainTest } must be annotated with { EnableAutomatedBeanTesting }. Please provide it or disable the test."
        );
    }

    #[test]
    fn test_blank_root_defaults_to_suite_namespace() {
        let suite = BeanSuite::new("acme.beans.BeanTest").enable(ScanConfiguration::new(""));
        let configuration = suite.required_configuration().unwrap();
        assert_eq!(configuration.scan_roots(), vec!["acme/beans".to_string()]);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let suite = BeanSuite::new("acme.BeanTest").enable(ScanConfiguration::new("acme..beans"));
        let error = suite.required_configuration().unwrap_err();
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
    }
}
