//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::Serialize;
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Serializable so the hosting shell can hand them to its UI layer verbatim.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
pub enum DomainError {
    /// A form-boundary rule was broken; never reaches a store
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The entity does not exist, or belongs to another user
    #[error("Not found: {0}")]
    NotFound(String),

    /// No active session, or the store rejected the caller's credentials
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// A uniqueness rule was broken (e.g. duplicate email on registration)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store could not complete the operation (unreachable, I/O failure)
    #[error("Store error: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::NotFound("note abc".to_string());
        assert_eq!(err.to_string(), "Not found: note abc");
    }

    #[test]
    fn test_error_serializes() {
        let err = DomainError::Validation("content is required".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("content is required"));
    }
}
