//! Validation utilities.

use crate::{FieldError, RosterError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `RosterError` on failure.
    fn validate_request(&self) -> Result<(), RosterError> {
        self.validate().map_err(validation_errors_to_roster_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Converts `validator::ValidationErrors` to `RosterError`.
#[must_use]
pub fn validation_errors_to_roster_error(errors: ValidationErrors) -> RosterError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    RosterError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::{ValidateEmail, ValidationError};

    /// Maximum length of the `VARCHAR(255)` user columns.
    pub const MAX_FIELD_LENGTH: usize = 255;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(with_message("not_blank", "must not be blank"));
        }
        Ok(())
    }

    /// Validates that a string fits a user column.
    pub fn fits_column(value: &str) -> Result<(), ValidationError> {
        if value.chars().count() > MAX_FIELD_LENGTH {
            return Err(with_message("length", "must be at most 255 characters"));
        }
        Ok(())
    }

    /// Validates an email address.
    pub fn email(value: &str) -> Result<(), ValidationError> {
        if !value.validate_email() {
            return Err(with_message("email", "Invalid email address"));
        }
        Ok(())
    }

    fn with_message(code: &'static str, message: &'static str) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    }
}
