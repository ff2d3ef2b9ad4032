//! Error handling for the data provider module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The requested entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A submitted form failed validation.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The backing store could not serve the request.
    #[error("Data provider unavailable: {0}")]
    Unavailable(String),

    /// Failed to serialize or parse CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ProviderError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ProviderError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
