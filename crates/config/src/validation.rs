//! Validation system for configuration values
//!
//! This module provides traits and utilities for validating configuration values.
//! Each config section implements the `ConfigSection` trait which includes validation.

pub use crate::error::ValidationError;

/// Trait for configuration sections that can validate themselves
///
/// Each config section (AppConfig, ServerConfig, etc.) implements this trait
/// to provide validation logic. Field names in errors are dotted JSON paths
/// such as `server.readTimeoutSeconds`.
pub trait ConfigSection: Default {
    /// Validates the configuration section
    ///
    /// Returns every validation error found. Ok means valid.
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a numeric value is at least `min`
    pub fn at_least<T>(value: T, min: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min {
            Err(ValidationError::with_value(
                field,
                format!("must be at least {}", min),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty when `flag` is set
    ///
    /// `flag_field` names the boolean that makes the value mandatory.
    pub fn required_if(
        flag: bool,
        value: &str,
        field: &str,
        flag_field: &str,
    ) -> Result<(), ValidationError> {
        if flag && value.trim().is_empty() {
            Err(ValidationError::new(
                field,
                format!("must not be empty when {} is true", flag_field),
            ))
        } else {
            Ok(())
        }
    }

    /// Validates every entry of a string list is non-empty
    pub fn entries_not_empty(values: &[String], field: &str) -> Vec<Result<(), ValidationError>> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Validator::not_empty(v, &format!("{}[{}]", field, i)))
            .collect()
    }

    /// Rejects a literal that matched none of the allowed options
    ///
    /// `unrecognized` is the raw text kept by an enum's fallback variant.
    /// Any value there is an error, even one that spells an allowed option.
    pub fn recognized(
        unrecognized: Option<&str>,
        allowed: &[&str],
        field: &str,
    ) -> Result<(), ValidationError> {
        match unrecognized {
            Some(value) => Err(ValidationError::with_value(
                field,
                format!("must be one of: {}", allowed.join(", ")),
                value,
            )),
            None => Ok(()),
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
