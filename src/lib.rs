//! QuillNotes Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations (remote + local)
//! - cache / viewmodel / service: query cache, list derivation, orchestration
//!
//! The UI shell (navigation, screens, styling) is not part of this crate; it
//! is expected to hold a [`service::NoteService`] and a
//! [`viewmodel::NoteListModel`] and wire user input through them.

pub mod cache;
pub mod config;
pub mod domain;
pub mod logging;
pub mod repository;
pub mod service;
pub mod session;
pub mod validation;
pub mod viewmodel;

pub use cache::NoteCache;
pub use domain::{Category, DomainError, DomainResult, Note, NoteDraft, NotePatch, NoteScope, User};
pub use repository::{AuthProvider, LocalStore, NoteStore, RemoteStore};
pub use service::NoteService;
pub use session::{Session, SessionManager};
pub use viewmodel::{visible_notes, NoteListModel, SortDirection};
