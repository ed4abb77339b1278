//! Contract verifier
//!
//! Runs the structural checks against one bean type and collects every
//! violation instead of stopping at the first one.

use beanwise_models::{
    AccessError, Bean, FieldDescriptor, MarkerCatalog, MarkerId, MarkerTarget, TypeDescriptor, Value,
    VerificationMode,
};
use beanwise_utils::{log_debug, BeanwiseError, BeanwiseResult, ScanSettings, VerificationSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::registry::GeneratorRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractCheck {
    Constructor,
    Accessors,
    Equality,
    HashCode,
    StringRepresentation,
}

impl ContractCheck {
    pub const ALL: [ContractCheck; 5] = [
        Self::Constructor,
        Self::Accessors,
        Self::Equality,
        Self::HashCode,
        Self::StringRepresentation,
    ];
}

impl fmt::Display for ContractCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor => write!(f, "constructor"),
            Self::Accessors => write!(f, "accessors"),
            Self::Equality => write!(f, "equality"),
            Self::HashCode => write!(f, "hash code"),
            Self::StringRepresentation => write!(f, "string representation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractViolation {
    pub check: ContractCheck,
    pub field: Option<String>,
    pub message: String,
}

impl ContractViolation {
    fn of_type(check: ContractCheck, message: impl Into<String>) -> Self {
        Self {
            check,
            field: None,
            message: message.into(),
        }
    }

    fn of_field(check: ContractCheck, field: &str, message: impl Into<String>) -> Self {
        Self {
            check,
            field: Some(field.to_string()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] {}: {}", self.check, field, self.message),
            None => write!(f, "[{}] {}", self.check, self.message),
        }
    }
}

/// Outcome of verifying one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub type_name: String,
    pub checks_run: Vec<ContractCheck>,
    pub excluded_fields: Vec<String>,
    pub violations: Vec<ContractViolation>,
}

impl VerificationReport {
    fn new(type_name: &str, excluded_fields: &BTreeSet<String>) -> Self {
        Self {
            type_name: type_name.to_string(),
            checks_run: Vec::new(),
            excluded_fields: excluded_fields.iter().cloned().collect(),
            violations: Vec::new(),
        }
    }

    pub fn is_passing(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations_of(&self, check: ContractCheck) -> impl Iterator<Item = &ContractViolation> {
        self.violations.iter().filter(move |v| v.check == check)
    }

    pub fn failed_checks(&self) -> BTreeSet<ContractCheck> {
        self.violations.iter().map(|v| v.check).collect()
    }

    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_result(self) -> BeanwiseResult<()> {
        if self.is_passing() {
            Ok(())
        } else {
            Err(BeanwiseError::contract_violation(
                &self.type_name,
                self.violations.len(),
                self.summary(),
            ))
        }
    }

    fn record(&mut self, check: ContractCheck, violations: Vec<ContractViolation>) {
        let outcome = if violations.is_empty() { "passed" } else { "failed" };
        log_debug!("{}: {} check {}", self.type_name, check, outcome);
        self.checks_run.push(check);
        self.violations.extend(violations);
    }
}

/// A field under contract together with the value it was populated with.
struct Assignment<'d> {
    field: &'d FieldDescriptor,
    value: Value,
}

pub struct ContractVerifier<'a> {
    registry: &'a GeneratorRegistry,
    field_marker: MarkerId,
    mode: VerificationMode,
    distinct_value_attempts: u32,
}

impl<'a> ContractVerifier<'a> {
    /// Fails when the configured field exclusion marker is unknown or is not
    /// a field-level marker.
    pub fn new(
        registry: &'a GeneratorRegistry,
        markers: &MarkerCatalog,
        scan: &ScanSettings,
        verification: &VerificationSettings,
    ) -> BeanwiseResult<Self> {
        let field_marker = markers.resolve(&scan.field_exclusion_marker, MarkerTarget::Field)?;
        Ok(Self {
            registry,
            field_marker,
            mode: verification.mode,
            distinct_value_attempts: verification.distinct_value_attempts,
        })
    }

    pub fn mode(&self) -> VerificationMode {
        self.mode
    }

    pub fn is_excluded(&self, field: &FieldDescriptor) -> bool {
        field.has_marker(&self.field_marker) || (self.mode == VerificationMode::Strict && field.immutable)
    }

    /// Marked fields keep their accessor check; only immutable fields in
    /// strict mode skip it.
    pub fn is_accessor_checked(&self, field: &FieldDescriptor) -> bool {
        !(self.mode == VerificationMode::Strict && field.immutable)
    }

    pub fn excluded_fields(&self, descriptor: &TypeDescriptor) -> BTreeSet<String> {
        descriptor
            .fields
            .iter()
            .filter(|field| self.is_excluded(field))
            .map(|field| field.name.clone())
            .collect()
    }

    pub fn verify(&self, descriptor: &TypeDescriptor) -> VerificationReport {
        let excluded = self.excluded_fields(descriptor);
        let mut report = VerificationReport::new(&descriptor.name, &excluded);

        if let Err(error) = instantiate(descriptor) {
            report.record(
                ContractCheck::Constructor,
                vec![ContractViolation::of_type(ContractCheck::Constructor, error.to_string())],
            );
            return report;
        }
        report.record(ContractCheck::Constructor, Vec::new());

        let contract_fields: Vec<&FieldDescriptor> = descriptor
            .fields
            .iter()
            .filter(|field| !excluded.contains(&field.name))
            .collect();

        let accessor_fields: Vec<&FieldDescriptor> = descriptor
            .fields
            .iter()
            .filter(|field| self.is_accessor_checked(field))
            .collect();

        report.record(ContractCheck::Accessors, self.check_accessors(descriptor, &accessor_fields));

        let (equality, hash) = self.check_equality_and_hash(descriptor, &contract_fields);
        report.record(ContractCheck::Equality, equality);
        report.record(ContractCheck::HashCode, hash);

        report.record(
            ContractCheck::StringRepresentation,
            self.check_string_representation(descriptor, &contract_fields),
        );

        report
    }

    /// Each field round-trips on a fresh instance, then all fields are set on
    /// one instance to catch mutators that touch other fields.
    fn check_accessors(&self, descriptor: &TypeDescriptor, fields: &[&FieldDescriptor]) -> Vec<ContractViolation> {
        let check = ContractCheck::Accessors;
        let mut violations = Vec::new();
        let mut round_tripped = Vec::new();

        for field in fields {
            let value = self.registry.generate(&field.value_type);
            let outcome = instantiate(descriptor).and_then(|mut bean| {
                bean.set(&field.name, value.clone())?;
                bean.get(&field.name)
            });

            match outcome {
                Ok(read) if read == value => round_tripped.push(Assignment { field, value }),
                Ok(read) => violations.push(ContractViolation::of_field(
                    check,
                    &field.name,
                    format!("accessor returned {:?} after mutator received {:?}", read, value),
                )),
                Err(error) => violations.push(ContractViolation::of_field(check, &field.name, error.to_string())),
            }
        }

        if round_tripped.len() < 2 {
            return violations;
        }

        let combined = instantiate(descriptor).and_then(|mut bean| {
            for assignment in &round_tripped {
                bean.set(&assignment.field.name, assignment.value.clone())?;
            }
            Ok(bean)
        });

        match combined {
            Ok(bean) => {
                for assignment in &round_tripped {
                    match bean.get(&assignment.field.name) {
                        Ok(read) if read == assignment.value => {}
                        Ok(read) => violations.push(ContractViolation::of_field(
                            check,
                            &assignment.field.name,
                            format!("overwritten by another mutator: expected {:?}, got {:?}", assignment.value, read),
                        )),
                        Err(error) => violations.push(ContractViolation::of_field(
                            check,
                            &assignment.field.name,
                            error.to_string(),
                        )),
                    }
                }
            }
            Err(error) => violations.push(ContractViolation::of_type(check, error.to_string())),
        }

        violations
    }

    fn check_equality_and_hash(
        &self,
        descriptor: &TypeDescriptor,
        fields: &[&FieldDescriptor],
    ) -> (Vec<ContractViolation>, Vec<ContractViolation>) {
        let mut equality = Vec::new();
        let mut hash = Vec::new();

        let assignments: Vec<Assignment<'_>> = fields
            .iter()
            .map(|field| Assignment {
                field,
                value: self.registry.generate(&field.value_type),
            })
            .collect();

        let (first, second) = match (populated(descriptor, &assignments), populated(descriptor, &assignments)) {
            (Ok(first), Ok(second)) => (first, second),
            (Err(error), _) | (_, Err(error)) => {
                equality.push(ContractViolation::of_type(ContractCheck::Equality, error.to_string()));
                return (equality, hash);
            }
        };
        let (first, second) = (first.as_ref(), second.as_ref());

        if !first.bean_eq(first) {
            equality.push(ContractViolation::of_type(ContractCheck::Equality, "not reflexive"));
        }
        if first.bean_eq(second) != second.bean_eq(first) {
            equality.push(ContractViolation::of_type(ContractCheck::Equality, "not symmetric"));
        }
        if (0..3).any(|_| first.bean_eq(second) != first.bean_eq(second)) {
            equality.push(ContractViolation::of_type(ContractCheck::Equality, "not consistent"));
        }
        if (0..3).any(|_| first.bean_hash() != first.bean_hash()) {
            hash.push(ContractViolation::of_type(ContractCheck::HashCode, "not consistent"));
        }

        if !first.bean_eq(second) {
            equality.push(ContractViolation::of_type(
                ContractCheck::Equality,
                "instances with identical field values are not equal",
            ));
        } else if first.bean_hash() != second.bean_hash() {
            hash.push(ContractViolation::of_type(
                ContractCheck::HashCode,
                "equal instances have different hash codes",
            ));
        }

        for assignment in &assignments {
            let name = &assignment.field.name;
            let Some(changed) =
                self.registry
                    .generate_distinct(&assignment.field.value_type, &assignment.value, self.distinct_value_attempts)
            else {
                equality.push(ContractViolation::of_field(
                    ContractCheck::Equality,
                    name,
                    format!("no value distinct from {:?} could be generated", assignment.value),
                ));
                continue;
            };

            match variant(descriptor, &assignments, name, changed) {
                Ok(other) => {
                    let other = other.as_ref();
                    if first.bean_eq(other) != other.bean_eq(first) {
                        equality.push(ContractViolation::of_field(ContractCheck::Equality, name, "not symmetric"));
                    } else if first.bean_eq(other) {
                        equality.push(ContractViolation::of_field(
                            ContractCheck::Equality,
                            name,
                            "changing the field does not affect equality",
                        ));
                    }
                }
                Err(error) => equality.push(ContractViolation::of_field(ContractCheck::Equality, name, error.to_string())),
            }
        }

        for field in descriptor.fields.iter().filter(|field| self.is_excluded(field)) {
            let current = match first.get(&field.name) {
                Ok(current) => current,
                Err(_) => continue,
            };
            let Some(changed) =
                self.registry
                    .generate_distinct(&field.value_type, &current, self.distinct_value_attempts)
            else {
                continue;
            };

            // Immutable excluded fields cannot be varied and are skipped.
            let Ok(other) = variant(descriptor, &assignments, &field.name, changed) else {
                continue;
            };

            let other = other.as_ref();
            if first.bean_eq(other) != other.bean_eq(first) {
                equality.push(ContractViolation::of_field(ContractCheck::Equality, &field.name, "not symmetric"));
            } else if !first.bean_eq(other) {
                equality.push(ContractViolation::of_field(
                    ContractCheck::Equality,
                    &field.name,
                    "excluded field affects equality",
                ));
            } else if first.bean_hash() != other.bean_hash() {
                hash.push(ContractViolation::of_field(
                    ContractCheck::HashCode,
                    &field.name,
                    "excluded field affects the hash code",
                ));
            }
        }

        (equality, hash)
    }

    /// Each field is changed on a populated instance; the rendering must
    /// change with it and show the new value.
    fn check_string_representation(
        &self,
        descriptor: &TypeDescriptor,
        fields: &[&FieldDescriptor],
    ) -> Vec<ContractViolation> {
        let check = ContractCheck::StringRepresentation;
        let assignments: Vec<Assignment<'_>> = fields
            .iter()
            .map(|field| Assignment {
                field,
                value: self.registry.generate(&field.value_type),
            })
            .collect();

        let rendered = match populated(descriptor, &assignments) {
            Ok(bean) => bean.render(),
            Err(error) => return vec![ContractViolation::of_type(check, error.to_string())],
        };

        let mut violations = Vec::new();
        for assignment in &assignments {
            let name = &assignment.field.name;
            // Equality already reports fields without a second value.
            let Some(changed) =
                self.registry
                    .generate_distinct(&assignment.field.value_type, &assignment.value, self.distinct_value_attempts)
            else {
                continue;
            };

            let shown = changed.to_string();
            let rerendered = match variant(descriptor, &assignments, name, changed.clone()) {
                Ok(bean) => bean.render(),
                Err(error) => {
                    violations.push(ContractViolation::of_field(check, name, error.to_string()));
                    continue;
                }
            };

            if rerendered == rendered {
                violations.push(ContractViolation::of_field(
                    check,
                    name,
                    format!("rendering {} does not change with the field", rendered),
                ));
            } else if !changed.is_null() && !rerendered.contains(&shown) {
                violations.push(ContractViolation::of_field(
                    check,
                    name,
                    format!("{} is missing from {}", shown, rerendered),
                ));
            }
        }

        violations
    }
}

/// Tries the no-args constructor, then the builder, then the all-arguments
/// constructor with a default-like value per field.
pub fn instantiate(descriptor: &TypeDescriptor) -> Result<Box<dyn Bean>, AccessError> {
    let strategies = &descriptor.instantiation;
    let mut last_error = None;

    if let Some(constructor) = strategies.no_args {
        return Ok(constructor());
    }

    if let Some(factory) = strategies.builder {
        match factory().build() {
            Ok(bean) => return Ok(bean),
            Err(error) => last_error = Some(error),
        }
    }

    if let Some(constructor) = strategies.all_args {
        let defaults = descriptor
            .fields
            .iter()
            .map(|field| Value::default_for(&field.value_type))
            .collect();
        match constructor(defaults) {
            Ok(bean) => return Ok(bean),
            Err(error) => last_error = Some(error),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        AccessError::construction(format!(
            "{} has no no-args constructor, builder or all-arguments constructor",
            descriptor.name
        ))
    }))
}

/// A fresh instance with every assignment applied.
fn populated(descriptor: &TypeDescriptor, assignments: &[Assignment<'_>]) -> Result<Box<dyn Bean>, AccessError> {
    let mut bean = instantiate(descriptor)?;
    for assignment in assignments {
        bean.set(&assignment.field.name, assignment.value.clone())?;
    }
    Ok(bean)
}

/// Like [`populated`], with `field` then set to `value`.
fn variant(
    descriptor: &TypeDescriptor,
    assignments: &[Assignment<'_>],
    field: &str,
    value: Value,
) -> Result<Box<dyn Bean>, AccessError> {
    let mut bean = populated(descriptor, assignments)?;
    bean.set(field, value)?;
    Ok(bean)
}
