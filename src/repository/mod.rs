//! Repository Layer
//!
//! Data access abstractions and implementations: the note store trait, the
//! auth provider trait, and the two backends (remote REST, local SQLite).

mod db;
mod local;
mod remote;
mod traits;


pub use db::{open_database, open_in_memory};
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use traits::{AuthProvider, NoteStore};
