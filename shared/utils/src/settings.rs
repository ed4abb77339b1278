use beanwise_models::{VerificationMode, EXCLUDE_BEAN_TESTING, EXCLUDE_FIELD_BEAN_TESTING};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

/// Suffix of a compiled type artifact in a resource listing.
pub const DEFAULT_ARTIFACT_SUFFIX: &str = ".class";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scan: ScanSettings,
    pub verification: VerificationSettings,
    pub generators: GeneratorSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub artifact_suffix: String,
    pub type_exclusion_marker: String,
    pub field_exclusion_marker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationSettings {
    pub mode: VerificationMode,
    /// Attempts at drawing a value different from the current one.
    pub distinct_value_attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub text_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "test".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("BEANWISE").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            artifact_suffix: DEFAULT_ARTIFACT_SUFFIX.to_string(),
            type_exclusion_marker: EXCLUDE_BEAN_TESTING.to_string(),
            field_exclusion_marker: EXCLUDE_FIELD_BEAN_TESTING.to_string(),
        }
    }
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            mode: VerificationMode::Strict,
            distinct_value_attempts: 32,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            text_length: 12,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}
