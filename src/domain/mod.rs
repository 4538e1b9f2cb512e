//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO I/O; only serde/chrono for data representation.

mod category;
mod entity;
mod note;
mod user;

pub use category::Category;
pub use entity::{DomainError, DomainResult, Entity};
pub use note::{Note, NoteDraft, NoteId, NotePatch, NoteScope};
pub use user::{User, UserId};
