//! Database Connection and Setup
//!
//! Opens the local SQLite database and applies the schema. There is no
//! schema versioning or migration path beyond additive `IF NOT EXISTS`
//! statements; callers should treat the local backend accordingly.

use rusqlite::Connection;
use std::path::Path;

use crate::domain::{DomainError, DomainResult};

/// Open (or create) the database at `path` and apply the schema
pub fn open_database(path: &Path) -> DomainResult<Connection> {
    let conn = Connection::open(path).map_err(|e| DomainError::Store(e.to_string()))?;
    apply_schema(&conn)?;
    Ok(conn)
}

/// In-memory database, used by tests and throwaway sessions
pub fn open_in_memory() -> DomainResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| DomainError::Store(e.to_string()))?;
    apply_schema(&conn)?;
    Ok(conn)
}

fn apply_schema(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id           TEXT PRIMARY KEY,
            email        TEXT NOT NULL UNIQUE,
            password     TEXT NOT NULL,
            display_name TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notes (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL REFERENCES users(id),
            title      TEXT,
            content    TEXT NOT NULL,
            category   TEXT NOT NULL,
            is_pinned  INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_notes_user ON notes(user_id);
        CREATE INDEX IF NOT EXISTS idx_notes_user_category ON notes(user_id, category);",
    )
    .map_err(|e| DomainError::Store(e.to_string()))?;

    Ok(())
}
