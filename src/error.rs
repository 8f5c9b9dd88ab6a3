//! Request-level error taxonomy.
//!
//! The `Display` text of each variant is the message shown to the end user.
//! Startup and training paths use `anyhow` instead.

use crate::schema::display_name;
use std::fmt;
use thiserror::Error;

/// A single form field that failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Missing input for {0}")]
    MissingField(String),

    #[error("Invalid number for {0}")]
    InvalidNumber(String),

    #[error("Value for {} exceeds max allowed ({})", display_name(.field), .max)]
    OutOfRange { field: String, max: f64 },
}

impl FieldError {
    /// Name of the offending feature.
    pub fn field(&self) -> &str {
        match self {
            FieldError::MissingField(field) | FieldError::InvalidNumber(field) => field,
            FieldError::OutOfRange { field, .. } => field,
        }
    }
}

/// Every field error reported for one submission, in schema order.
///
/// Fail-fast validation always yields exactly one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure(Vec<FieldError>);

impl ValidationFailure {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self(errors)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<FieldError> for ValidationFailure {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

/// Why a request produced no diagnosis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Error in prediction: {0}")]
    Prediction(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}
