use crate::settings::AppConfig;
use crate::error::{BeanwiseError, BeanwiseResult};
use validator::{Validate, ValidationErrors};

pub fn validate_model<T: Validate>(model: &T) -> BeanwiseResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(BeanwiseError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.code {
                std::borrow::Cow::Borrowed("namespace") => {
                    format!("Field '{}' is not a valid namespace", field)
                }
                std::borrow::Cow::Borrowed("package") => {
                    format!("Field '{}' contains an invalid package name", field)
                }
                _ => format!("Validation failed for field '{}': {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Rejects settings the scanner and verifier cannot work with.
pub fn validate_settings(config: &AppConfig) -> BeanwiseResult<()> {
    let suffix = &config.scan.artifact_suffix;
    if suffix.is_empty() || suffix.contains('/') {
        return Err(BeanwiseError::validation(
            "scan.artifact_suffix",
            format!("Artifact suffix '{}' must be non-empty and contain no '/'", suffix),
        ));
    }

    if config.scan.type_exclusion_marker.trim().is_empty() {
        return Err(BeanwiseError::validation(
            "scan.type_exclusion_marker",
            "Type exclusion marker is required",
        ));
    }

    if config.scan.field_exclusion_marker.trim().is_empty() {
        return Err(BeanwiseError::validation(
            "scan.field_exclusion_marker",
            "Field exclusion marker is required",
        ));
    }

    if config.verification.distinct_value_attempts == 0 {
        return Err(BeanwiseError::validation(
            "verification.distinct_value_attempts",
            "At least one attempt is required",
        ));
    }

    if config.generators.text_length == 0 {
        return Err(BeanwiseError::validation(
            "generators.text_length",
            "Generated text must not be empty",
        ));
    }

    Ok(())
}
