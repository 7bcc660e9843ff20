//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// Requested sort key is not in the allow-list
    #[error("{0} is not a valid sortBy option")]
    InvalidSortField(String),

    /// Opaque failure from the storage collaborator
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn carrier_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Carrier",
            field: "id",
            value: id.into(),
        }
    }

    /// Whether the caller sent something we refuse (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
