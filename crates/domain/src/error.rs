//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ClienteleError`] via `From`. The HTTP adapter maps every variant to
//! exactly one status code.

use crate::validation::Violations;

/// Top-level error for every fallible operation in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum ClienteleError {
    /// The submitted data breaks one or more field rules.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An equivalent record already exists.
    #[error("conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level rule violations.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// At least one rule was violated; messages are kept in report order.
    #[error("{0}")]
    Rejected(Violations),
}

/// A record with the same identity is already stored.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with name {name} already exists")]
pub struct ConflictError {
    /// Kind of record, e.g. `"Customer"`.
    pub entity: &'static str,
    /// The identifying name that collided.
    pub name: String,
}

/// No record exists under the given identifier.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"Customer"`.
    pub entity: &'static str,
    /// The identifier that was looked up, as received.
    pub id: String,
}
