//! Note Service
//!
//! Orchestration over the session, the note store and the query cache.
//! Reads serve a fresh cached snapshot when one exists; mutations go
//! validate → store → invalidate, and the cache is left untouched when the
//! store fails so stale-but-valid data is preserved. No retries anywhere:
//! failures are reported once and the user retries the triggering action.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::NoteCache;
use crate::domain::{DomainError, DomainResult, Note, NoteDraft, NotePatch, NoteScope};
use crate::repository::{AuthProvider, NoteStore};
use crate::session::{Session, SessionManager};
use crate::validation;

pub struct NoteService {
    store: Arc<dyn NoteStore>,
    auth: Arc<dyn AuthProvider>,
    cache: Arc<NoteCache>,
    sessions: Arc<SessionManager>,
}

impl NoteService {
    pub fn new(
        store: Arc<dyn NoteStore>,
        auth: Arc<dyn AuthProvider>,
        cache: Arc<NoteCache>,
        sessions: Arc<SessionManager>,
    ) -> Self {
        Self {
            store,
            auth,
            cache,
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn cache(&self) -> &NoteCache {
        &self.cache
    }

    /// Notes for `scope`: the cached snapshot when fresh, a refetch when
    /// missing or stale.
    pub async fn list_notes(&self, scope: &NoteScope) -> DomainResult<Vec<Note>> {
        let session = self.sessions.require()?;

        if let Some(cached) = self.cache.read(scope) {
            if !cached.stale {
                debug!(?scope, count = cached.notes.len(), "serving cached notes");
                return Ok(cached.notes);
            }
        }

        let notes = self.store.list(&session, scope).await?;
        debug!(?scope, count = notes.len(), "fetched notes");
        self.cache.store(scope.clone(), notes.clone());
        Ok(notes)
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> DomainResult<Note> {
        validation::validate_draft(draft)?;
        let session = self.sessions.require()?;

        let note = self.store.insert(&session, draft).await?;
        // Invalidate before reporting success so the next read refetches
        self.cache.invalidate_notes();
        info!(note_id = %note.id, "created note");
        Ok(note)
    }

    pub async fn update_note(&self, id: &str, patch: &NotePatch) -> DomainResult<Note> {
        validation::validate_patch(patch)?;
        let session = self.sessions.require()?;

        let note = self.store.update(&session, id, patch).await?;
        self.cache.invalidate_notes();
        info!(note_id = %note.id, "updated note");
        Ok(note)
    }

    pub async fn delete_note(&self, id: &str) -> DomainResult<()> {
        let session = self.sessions.require()?;

        if let Err(err) = self.store.delete(&session, id).await {
            // Cache untouched on failure: re-rendering keeps the prior list
            warn!(note_id = %id, %err, "delete failed");
            return Err(err);
        }
        self.cache.invalidate_notes();
        info!(note_id = %id, "deleted note");
        Ok(())
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<Session> {
        validation::validate_credentials(email, password)?;
        if matches!(display_name, Some(name) if !validation::is_valid_display_name(name)) {
            return Err(DomainError::Validation(
                "display name must be at least 2 characters".to_string(),
            ));
        }
        let session = self.auth.sign_up(email, password, display_name).await?;
        self.begin_session(session.clone());
        Ok(session)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session> {
        validation::validate_credentials(email, password)?;
        let session = self.auth.sign_in(email, password).await?;
        self.begin_session(session.clone());
        Ok(session)
    }

    /// Start a session, dropping any cached notes from the previous one so
    /// nothing leaks across users.
    fn begin_session(&self, session: Session) {
        self.cache.clear();
        self.sessions.signed_in(session);
    }

    /// Sign out and drop cached notes so nothing leaks across sessions
    pub async fn sign_out(&self) -> DomainResult<()> {
        if let Some(session) = self.sessions.current() {
            self.auth.sign_out(&session).await?;
        }
        self.sessions.signed_out();
        self.cache.clear();
        Ok(())
    }
}
