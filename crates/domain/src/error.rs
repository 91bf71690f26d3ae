//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HestiaError`]
//! via `#[from]` or by boxing the source when crossing a port boundary.

/// Workspace-level error enum.
#[derive(Debug, thiserror::Error)]
pub enum HestiaError {
    /// A value object or rule failed validation.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced entity or service does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A service-call payload could not be decoded or was rejected.
    #[error("invalid service payload")]
    Payload(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The host's service dispatcher reported a failure.
    #[error("service dispatch failed")]
    Dispatch(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Validation failures for domain value objects.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Entity ids must look like `domain.object`.
    #[error("malformed entity id: {0:?}")]
    MalformedEntityId(String),
}

/// A referenced thing does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// What kind of thing was looked up (`"Entity"`, `"Service"`, …).
    pub entity: &'static str,
    /// The identifier that missed.
    pub id: String,
}
