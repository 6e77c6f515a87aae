//! Domain error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::order::{OrderError, ValidationError};

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Aggregate not found: {aggregate_type} with id {aggregate_id}")]
    AggregateNotFound {
        aggregate_type: &'static str,
        aggregate_id: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationError> for DomainError {
    fn from(e: ValidationError) -> Self {
        DomainError::Order(e.into())
    }
}

/// Coarse classification of a [`DomainError`] for callers that only need
/// to decide how to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; fix the request and retry.
    Validation,
    /// The order's status forbids the action.
    InvalidState,
    NotFound,
    /// Someone else changed the order first.
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Order(OrderError::Validation(_)) => ErrorKind::Validation,
            DomainError::Order(OrderError::InvalidState(_)) => ErrorKind::InvalidState,
            DomainError::Order(OrderError::NotFound) | DomainError::AggregateNotFound { .. } => {
                ErrorKind::NotFound
            }
            DomainError::Order(OrderError::AlreadyCreated) => ErrorKind::Conflict,
            DomainError::Catalog(CatalogError::ProductNotFound(_))
            | DomainError::Catalog(CatalogError::CustomerNotFound(_)) => ErrorKind::NotFound,
            DomainError::Catalog(_) => ErrorKind::Validation,
            DomainError::EventStore(EventStoreError::ConcurrencyConflict { .. }) => {
                ErrorKind::Conflict
            }
            DomainError::EventStore(_) | DomainError::Serialization(_) => ErrorKind::Internal,
        }
    }
}
