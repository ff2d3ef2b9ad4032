//! Error handling for dashboard intents

use crate::notifications::Severity;
use crate::provider::error::ProviderError;
use thiserror::Error;

/// Why an intent failed. Each failure has already been shown to the user as a
/// notification by the time the caller sees it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The data provider or rendering surface failed.
    #[error("{0}")]
    Collaborator(String),
}

impl DashboardError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DashboardError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Severity of the notification shown for this error.
    pub fn severity(&self) -> Severity {
        match self {
            DashboardError::Validation { .. } => Severity::Warning,
            DashboardError::NotFound { .. } | DashboardError::Collaborator(_) => Severity::Error,
        }
    }
}

impl From<ProviderError> for DashboardError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotFound { kind, id } => DashboardError::NotFound { kind, id },
            ProviderError::Validation { field, reason } => {
                DashboardError::Validation { field, reason }
            }
            other => DashboardError::Collaborator(other.to_string()),
        }
    }
}
