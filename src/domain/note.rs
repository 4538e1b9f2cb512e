//! Note Entity
//!
//! A user-owned note with optional title, required content, a category tag,
//! a pin flag and creation/update timestamps. The store is the sole source
//! of truth; nothing in this crate persists a note outside of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::entity::Entity;
use super::user::UserId;

/// Stable opaque note identifier, assigned at creation
pub type NoteId = String;

/// A user-owned note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier, immutable after creation
    pub id: NoteId,
    /// Owning user; every store operation is scoped by it
    pub user_id: UserId,
    /// Optional short title; rendered as "Untitled" when absent or empty
    #[serde(default)]
    pub title: Option<String>,
    /// The note body; the only field required for a note to be valid
    pub content: String,
    pub category: Category,
    /// Pinned notes sort before unpinned ones regardless of sort direction
    #[serde(default)]
    pub is_pinned: bool,
    /// Assigned at creation, immutable afterwards
    pub created_at: DateTime<Utc>,
    /// Reassigned by the store on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Title for presentation, with the fallback for untitled notes
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Untitled",
        }
    }

    /// Case-insensitive substring match against title or content.
    /// `query` must already be lower-cased. A missing title compares as
    /// the empty string, so it never matches on title alone.
    pub fn matches(&self, query: &str) -> bool {
        let title = self.title.as_deref().unwrap_or("");
        title.to_lowercase().contains(query) || self.content.to_lowercase().contains(query)
    }
}

impl Entity for Note {
    type Id = NoteId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

/// Creation payload: everything the form collects. Id, ownership and
/// timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub is_pinned: bool,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>, category: Category) -> Self {
        Self {
            title: None,
            content: content.into(),
            category,
            is_pinned: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }
}

/// Update payload: any subset of mutable fields. `id`, `user_id` and
/// `created_at` cannot be patched; the store assigns a new `updated_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.is_pinned.is_none()
    }

    /// Apply this patch to an existing note, leaving immutable fields alone
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = Some(title.clone());
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(category) = &self.category {
            note.category = category.clone();
        }
        if let Some(is_pinned) = self.is_pinned {
            note.is_pinned = is_pinned;
        }
    }
}

/// Which notes a query covers: everything the user owns, or one category.
/// This is the key of cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NoteScope {
    #[default]
    All,
    Category(Category),
}

impl NoteScope {
    /// Scope from the navigation boundary: an absent category means
    /// "all categories".
    pub fn from_nav(category: Option<&str>) -> Self {
        match category {
            Some(tag) if !tag.trim().is_empty() => NoteScope::Category(Category::parse(tag)),
            _ => NoteScope::All,
        }
    }

    pub fn category(&self) -> Option<&Category> {
        match self {
            NoteScope::All => None,
            NoteScope::Category(cat) => Some(cat),
        }
    }
}
