//! Query Cache
//!
//! In-memory, scope-keyed cache of fetched note collections with
//! invalidate-on-mutation semantics. Entries never expire on a timer;
//! staleness is triggered only by explicit invalidation after a mutation
//! commits. The cache is process-wide: share it behind an `Arc` and every
//! reader observes an invalidation before its next read.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{Note, NoteScope};

/// A cached collection plus its staleness flag
#[derive(Debug, Clone)]
pub struct CachedNotes {
    pub notes: Vec<Note>,
    /// When true, the snapshot may still be rendered but must not be
    /// treated as authoritative; the next read should refetch.
    pub stale: bool,
}

#[derive(Debug)]
struct CacheEntry {
    notes: Vec<Note>,
    stale: bool,
}

/// Scope-keyed cache of note query results
#[derive(Debug, Default)]
pub struct NoteCache {
    entries: RwLock<HashMap<NoteScope, CacheEntry>>,
}

impl NoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known collection for `scope`, if any was ever fetched
    pub fn read(&self, scope: &NoteScope) -> Option<CachedNotes> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(scope).map(|entry| CachedNotes {
            notes: entry.notes.clone(),
            stale: entry.stale,
        })
    }

    /// Record a fresh fetch for `scope`
    pub fn store(&self, scope: NoteScope, notes: Vec<Note>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(scope, CacheEntry { notes, stale: false });
    }

    /// Mark every cached scope stale.
    ///
    /// Synchronous on purpose: the caller invokes this after a mutation
    /// commits and before reporting success, so no subsequent read can
    /// observe the pre-mutation snapshot as fresh.
    pub fn invalidate_notes(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for entry in entries.values_mut() {
            entry.stale = true;
        }
    }

    /// Drop everything, e.g. on sign-out so no data leaks across sessions
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: None,
            content: format!("note {id}"),
            category: Category::Personal,
            is_pinned: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_read_miss_then_hit() {
        let cache = NoteCache::new();
        assert!(cache.read(&NoteScope::All).is_none());

        cache.store(NoteScope::All, vec![note("a")]);
        let cached = cache.read(&NoteScope::All).unwrap();
        assert!(!cached.stale);
        assert_eq!(cached.notes.len(), 1);
    }

    #[test]
    fn test_invalidate_marks_every_scope_stale() {
        let cache = NoteCache::new();
        cache.store(NoteScope::All, vec![note("a")]);
        cache.store(NoteScope::Category(Category::Work), vec![note("b")]);

        cache.invalidate_notes();

        let all = cache.read(&NoteScope::All).unwrap();
        let work = cache.read(&NoteScope::Category(Category::Work)).unwrap();
        assert!(all.stale);
        assert!(work.stale);
        // Snapshots survive invalidation; only the flag flips
        assert_eq!(all.notes[0].id, "a");
    }

    #[test]
    fn test_store_after_invalidate_is_fresh_again() {
        let cache = NoteCache::new();
        cache.store(NoteScope::All, vec![note("a")]);
        cache.invalidate_notes();
        cache.store(NoteScope::All, vec![note("a"), note("b")]);

        let cached = cache.read(&NoteScope::All).unwrap();
        assert!(!cached.stale);
        assert_eq!(cached.notes.len(), 2);
    }

    #[test]
    fn test_clear_drops_entries() {
        let cache = NoteCache::new();
        cache.store(NoteScope::All, vec![note("a")]);
        cache.clear();
        assert!(cache.read(&NoteScope::All).is_none());
    }
}
