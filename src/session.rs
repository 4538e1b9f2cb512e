//! Session Management
//!
//! An explicit session value handed to every store call, plus sign-in /
//! sign-out change events. Consumers subscribe to the watch channel instead
//! of re-reading an ambient "current user" from storage.

use tokio::sync::watch;

use crate::domain::{DomainError, DomainResult, User};

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    /// Bearer token for the remote store; `None` for the local backend
    pub access_token: Option<String>,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self {
            user,
            access_token: None,
        }
    }

    pub fn with_token(user: User, access_token: impl Into<String>) -> Self {
        Self {
            user,
            access_token: Some(access_token.into()),
        }
    }
}

/// Process-wide holder of the current session.
///
/// Sign-in and sign-out are published through a watch channel so views react
/// to auth changes as events rather than polling.
pub struct SessionManager {
    tx: watch::Sender<Option<Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// The current session, if any
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// The current session, or `Unauthorized` when signed out
    pub fn require(&self) -> DomainResult<Session> {
        self.current()
            .ok_or_else(|| DomainError::Unauthorized("no active session".to_string()))
    }

    pub fn signed_in(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    pub fn signed_out(&self) {
        self.tx.send_replace(None);
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fails_when_signed_out() {
        let sessions = SessionManager::new();
        assert!(sessions.current().is_none());
        assert!(matches!(
            sessions.require(),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_subscribers_observe_sign_in_and_out() {
        let sessions = SessionManager::new();
        let mut rx = sessions.subscribe();

        sessions.signed_in(Session::new(User::new("u1", "ada@example.com")));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().user.id, "u1");

        sessions.signed_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(sessions.require().is_err());
    }
}
