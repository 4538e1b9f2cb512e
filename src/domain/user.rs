//! User Entity
//!
//! The authenticated owner of notes. Authentication itself is delegated to
//! the backing store (remote auth endpoints, or the local user table).

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Stable opaque user identifier
pub type UserId = String;

/// An account that owns notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: None,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}
