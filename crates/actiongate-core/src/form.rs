//! Input-form validation capability.
//!
//! A form runs two hooks — `validate` for field-level checks, then
//! `verify_strictly` for the stricter cross-field pass — and both always
//! run, in that order, so all errors are accumulated before the gate
//! decides. `has_errors` is consulted only after both hooks complete.

use std::fmt;

use serde::Serialize;

/// A single recorded validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulator shared by both validation hooks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// Validated input of an action. Implementations hold their own
/// [`ValidationErrors`] so both hooks can record findings.
pub trait InputForm {
    /// Field-level validation. Records findings, never fails.
    fn validate(&mut self);

    /// Stricter second pass (cross-field rules, limits). Always runs after
    /// `validate`, even when errors were already recorded.
    fn verify_strictly(&mut self);

    /// Errors accumulated so far.
    fn errors(&self) -> &ValidationErrors;

    fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}
