//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can be remote (REST) or local (SQLite).

use async_trait::async_trait;

use crate::domain::{DomainResult, Note, NoteDraft, NotePatch, NoteScope};
use crate::session::Session;

/// The durable note collection, keyed by id and scoped to the calling user.
///
/// Listing order is arbitrary; ordering is the view-model's responsibility.
/// Every operation takes the session explicitly so there is no ambient
/// current-user state.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// List the caller's notes, optionally narrowed to one category
    async fn list(&self, session: &Session, scope: &NoteScope) -> DomainResult<Vec<Note>>;

    /// Insert a new note; the store assigns id and both timestamps
    async fn insert(&self, session: &Session, draft: &NoteDraft) -> DomainResult<Note>;

    /// Patch an existing note; the store assigns a new `updated_at`.
    /// Fails with `NotFound` when the id does not exist or the note
    /// belongs to another user.
    async fn update(&self, session: &Session, id: &str, patch: &NotePatch) -> DomainResult<Note>;

    /// Delete a note, with the same ownership rules as `update`
    async fn delete(&self, session: &Session, id: &str) -> DomainResult<()>;
}

/// Account registration and credential verification.
///
/// The remote backend delegates both entirely to the provider; the local
/// backend keeps its own user table for development use.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<Session>;

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session>;

    async fn sign_out(&self, session: &Session) -> DomainResult<()>;
}
