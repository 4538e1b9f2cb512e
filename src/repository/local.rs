//! Local Store Implementation
//!
//! SQLite-backed implementation of `NoteStore` and `AuthProvider`.
//!
//! This is the on-device fallback backend. Every read-modify-write goes
//! through one mutex-guarded connection, so concurrent callers cannot
//! interleave and lose updates. Limitations callers must know about: no
//! schema versioning, and credentials in the user table are stored verbatim
//! for development parity with the hosted provider, not hardened.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    Category, DomainError, DomainResult, Note, NoteDraft, NotePatch, NoteScope, User,
};
use crate::session::Session;

use super::db;
use super::traits::{AuthProvider, NoteStore};

const NOTE_COLUMNS: &str = "id, user_id, title, content, category, is_pinned, created_at, updated_at";

/// SQLite implementation of the note store and auth provider
pub struct LocalStore {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> DomainResult<Self> {
        Ok(Self::new(db::open_database(path)?))
    }

    /// In-memory store for tests and throwaway sessions
    pub fn open_in_memory() -> DomainResult<Self> {
        Ok(Self::new(db::open_in_memory()?))
    }
}

fn find_note(conn: &Connection, user_id: &str, id: &str) -> DomainResult<Option<Note>> {
    let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1 AND user_id = ?2");
    conn.query_row(&sql, params![id, user_id], row_to_note)
        .optional()
        .map_err(|e| DomainError::Store(e.to_string()))
        .map(Option::flatten)
}

#[async_trait]
impl NoteStore for LocalStore {
    async fn list(&self, session: &Session, scope: &NoteScope) -> DomainResult<Vec<Note>> {
        let conn = self.conn.lock().await;

        let rows = match scope.category() {
            Some(category) => {
                let sql =
                    format!("SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ?1 AND category = ?2");
                let mut stmt = conn
                    .prepare(&sql)
                    .map_err(|e| DomainError::Store(e.to_string()))?;
                let rows = stmt
                    .query_map(params![session.user.id, category.as_tag()], row_to_note)
                    .map_err(|e| DomainError::Store(e.to_string()))?
                    .collect::<Result<Vec<_>, _>>();
                rows
            }
            None => {
                let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ?1");
                let mut stmt = conn
                    .prepare(&sql)
                    .map_err(|e| DomainError::Store(e.to_string()))?;
                let rows = stmt
                    .query_map(params![session.user.id], row_to_note)
                    .map_err(|e| DomainError::Store(e.to_string()))?
                    .collect::<Result<Vec<_>, _>>();
                rows
            }
        };

        // Malformed rows are skipped rather than failing the whole read
        let notes = rows
            .map_err(|e| DomainError::Store(e.to_string()))?
            .into_iter()
            .flatten()
            .collect();
        Ok(notes)
    }

    async fn insert(&self, session: &Session, draft: &NoteDraft) -> DomainResult<Note> {
        let conn = self.conn.lock().await;

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            user_id: session.user.id.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            category: draft.category.clone(),
            is_pinned: draft.is_pinned,
            created_at: now,
            updated_at: now,
        };

        conn.execute(
            "INSERT INTO notes (id, user_id, title, content, category, is_pinned, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                note.id,
                note.user_id,
                note.title,
                note.content,
                note.category.as_tag(),
                note.is_pinned as i32,
                note.created_at.to_rfc3339(),
                note.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Store(e.to_string()))?;

        Ok(note)
    }

    async fn update(&self, session: &Session, id: &str, patch: &NotePatch) -> DomainResult<Note> {
        // Read, patch in memory, write back, all under one guard so other
        // callers cannot interleave with the read-modify-write.
        let conn = self.conn.lock().await;

        let mut note = find_note(&conn, &session.user.id, id)?
            .ok_or_else(|| DomainError::NotFound(format!("note {id}")))?;

        patch.apply_to(&mut note);
        note.updated_at = Utc::now();

        conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, category = ?3, is_pinned = ?4, updated_at = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                note.title,
                note.content,
                note.category.as_tag(),
                note.is_pinned as i32,
                note.updated_at.to_rfc3339(),
                note.id,
                note.user_id,
            ],
        )
        .map_err(|e| DomainError::Store(e.to_string()))?;

        Ok(note)
    }

    async fn delete(&self, session: &Session, id: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let affected = conn
            .execute(
                "DELETE FROM notes WHERE id = ?1 AND user_id = ?2",
                params![id, session.user.id],
            )
            .map_err(|e| DomainError::Store(e.to_string()))?;

        if affected == 0 {
            return Err(DomainError::NotFound(format!("note {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for LocalStore {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<Session> {
        let conn = self.conn.lock().await;

        let existing: Option<String> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DomainError::Store(e.to_string()))?;
        if existing.is_some() {
            return Err(DomainError::Conflict("email already registered".to_string()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        };
        conn.execute(
            "INSERT INTO users (id, email, password, display_name, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.email,
                password,
                user.display_name,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Store(e.to_string()))?;

        tracing::info!(user_id = %user.id, "registered local user");
        Ok(Session::new(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session> {
        let conn = self.conn.lock().await;

        let user = conn
            .query_row(
                "SELECT id, email, display_name FROM users WHERE email = ?1 AND password = ?2",
                params![email, password],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        display_name: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| DomainError::Store(e.to_string()))?
            .ok_or_else(|| DomainError::Unauthorized("invalid credentials".to_string()))?;

        Ok(Session::new(user))
    }

    async fn sign_out(&self, _session: &Session) -> DomainResult<()> {
        // Nothing held server-side for the local backend
        Ok(())
    }
}

/// Convert a database row to a Note.
///
/// Returns `Ok(None)` for rows whose timestamps do not parse; corrupt rows
/// are dropped from reads instead of crashing them.
fn row_to_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Option<Note>> {
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;
    let (Ok(created_at), Ok(updated_at)) = (
        DateTime::parse_from_rfc3339(&created_at),
        DateTime::parse_from_rfc3339(&updated_at),
    ) else {
        tracing::warn!("skipping note row with unparseable timestamps");
        return Ok(None);
    };

    let category: String = row.get(4)?;
    Ok(Some(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        category: Category::parse(&category),
        is_pinned: row.get::<_, i32>(5)? != 0,
        created_at: created_at.with_timezone(&Utc),
        updated_at: updated_at.with_timezone(&Utc),
    }))
}
