//! Console error types.

use domain::{CatalogError, DomainError, ParseMoneyError, Role, Section};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed script: {0}")]
    Script(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("invalid price: {0}")]
    InvalidPrice(#[from] ParseMoneyError),

    #[error("unknown {kind} key {key:?}")]
    UnknownKey { kind: &'static str, key: String },

    #[error("{kind} key {key:?} is already in use")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("role {role} may not use the {section} section")]
    AccessDenied { role: Role, section: Section },
}

impl ConsoleError {
    /// Short machine-readable reason reported for a rejected step.
    pub fn reason(&self) -> &'static str {
        match self {
            ConsoleError::Domain(e) => e.kind().as_str(),
            ConsoleError::Catalog(CatalogError::ProductNotFound(_))
            | ConsoleError::Catalog(CatalogError::CustomerNotFound(_)) => "not_found",
            ConsoleError::Catalog(_) | ConsoleError::InvalidPrice(_) => "validation",
            ConsoleError::UnknownKey { .. } | ConsoleError::DuplicateKey { .. } => "script",
            ConsoleError::AccessDenied { .. } => "access_denied",
            ConsoleError::Io(_) | ConsoleError::Script(_) => "internal",
        }
    }
}
