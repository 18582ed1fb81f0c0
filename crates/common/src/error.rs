//! Error vocabulary shared by every context.

use thiserror::Error;

/// Broad category of a failure, used by callers to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; a value object could not be constructed.
    Validation,

    /// Well-formed input that a business rule refuses.
    BusinessRule,

    /// A referenced entity does not exist.
    NotFound,

    /// Storage, serialization or event delivery failed.
    Infrastructure,
}

impl ErrorKind {
    /// Returns the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::BusinessRule => "business_rule",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Infrastructure => "infrastructure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised while constructing shared identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Location codes are exactly five ASCII letters or digits.
    #[error("Invalid location code '{code}': expected 5 alphanumeric characters")]
    InvalidLocationCode { code: String },

    /// Voyage numbers must not be blank.
    #[error("Voyage number must not be empty")]
    EmptyVoyageNumber,

    /// The tracking id could not be parsed.
    #[error("Invalid tracking id '{value}'")]
    InvalidTrackingId { value: String },
}

/// Errors returned by repository ports.
///
/// Repositories only offer single-entity point operations, so there is no
/// transaction or conflict variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No entity is stored under the given key.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The backing storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Shorthand for a not-found error.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::Storage(_) => ErrorKind::Infrastructure,
        }
    }
}
