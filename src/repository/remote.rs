//! Remote Store Implementation
//!
//! REST client for the hosted backend. Notes live behind a PostgREST-style
//! table endpoint (`/rest/v1/notes` with `eq.` filters); auth is delegated
//! entirely to the provider's `/auth/v1` endpoints. The client never orders
//! results server-side; ordering belongs to the view-model.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, DomainError, DomainResult, Note, NoteDraft, NotePatch, NoteScope, User};
use crate::session::Session;

use super::traits::{AuthProvider, NoteStore};

/// REST client for the hosted note store
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn notes_url(&self) -> String {
        format!("{}/rest/v1/notes", self.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Bearer token for a request: the session token when present,
    /// the anon key otherwise
    fn bearer<'a>(&'a self, session: &'a Session) -> &'a str {
        session.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

/// Map a non-success response to a domain error
async fn check(response: reqwest::Response) -> DomainResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::Unauthorized(body),
        StatusCode::NOT_FOUND => DomainError::NotFound(body),
        _ => DomainError::Store(format!("{status}: {body}")),
    })
}

fn send_err(e: reqwest::Error) -> DomainError {
    DomainError::Store(e.to_string())
}

#[derive(Serialize)]
struct InsertRow<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    content: &'a str,
    category: &'a Category,
    is_pinned: bool,
}

#[async_trait]
impl NoteStore for RemoteStore {
    async fn list(&self, session: &Session, scope: &NoteScope) -> DomainResult<Vec<Note>> {
        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{}", session.user.id)),
        ];
        if let Some(category) = scope.category() {
            query.push(("category".to_string(), format!("eq.{}", category.as_tag())));
        }

        let response = self
            .http
            .get(self.notes_url())
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer(session))
            .query(&query)
            .send()
            .await
            .map_err(send_err)?;

        check(response).await?.json().await.map_err(send_err)
    }

    async fn insert(&self, session: &Session, draft: &NoteDraft) -> DomainResult<Note> {
        let row = InsertRow {
            user_id: &session.user.id,
            title: draft.title.as_deref(),
            content: &draft.content,
            category: &draft.category,
            is_pinned: draft.is_pinned,
        };

        let response = self
            .http
            .post(self.notes_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer(session))
            .json(&row)
            .send()
            .await
            .map_err(send_err)?;

        let mut rows: Vec<Note> = check(response).await?.json().await.map_err(send_err)?;
        rows.pop()
            .ok_or_else(|| DomainError::Store("insert returned no representation".to_string()))
    }

    async fn update(&self, session: &Session, id: &str, patch: &NotePatch) -> DomainResult<Note> {
        let response = self
            .http
            .patch(self.notes_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer(session))
            .query(&[
                ("id", format!("eq.{id}")),
                ("user_id", format!("eq.{}", session.user.id)),
            ])
            .json(patch)
            .send()
            .await
            .map_err(send_err)?;

        // An empty representation means no row matched the id/owner filter
        let mut rows: Vec<Note> = check(response).await?.json().await.map_err(send_err)?;
        rows.pop()
            .ok_or_else(|| DomainError::NotFound(format!("note {id}")))
    }

    async fn delete(&self, session: &Session, id: &str) -> DomainResult<()> {
        let response = self
            .http
            .delete(self.notes_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(self.bearer(session))
            .query(&[
                ("id", format!("eq.{id}")),
                ("user_id", format!("eq.{}", session.user.id)),
            ])
            .send()
            .await
            .map_err(send_err)?;

        let rows: Vec<Note> = check(response).await?.json().await.map_err(send_err)?;
        if rows.is_empty() {
            return Err(DomainError::NotFound(format!("note {id}")));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default)]
    access_token: Option<String>,
    user: RemoteUser,
}

#[derive(Deserialize)]
struct RemoteUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl AuthResponse {
    fn into_session(self, fallback_email: &str) -> Session {
        let display_name = self
            .user
            .user_metadata
            .get("display_name")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let user = User {
            id: self.user.id,
            email: self.user.email.unwrap_or_else(|| fallback_email.to_string()),
            display_name,
        };
        match self.access_token {
            Some(token) => Session::with_token(user, token),
            None => Session::new(user),
        }
    }
}

#[async_trait]
impl AuthProvider for RemoteStore {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<Session> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "data": { "display_name": display_name },
        });

        let response = self
            .http
            .post(self.auth_url("signup"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(send_err)?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Conflict(body));
        }
        let auth: AuthResponse = check(response).await?.json().await.map_err(send_err)?;
        Ok(auth.into_session(email))
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session> {
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(send_err)?;

        // The provider reports bad credentials as 400
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(DomainError::Unauthorized("invalid credentials".to_string()));
        }
        let auth: AuthResponse = check(response).await?.json().await.map_err(send_err)?;
        Ok(auth.into_session(email))
    }

    async fn sign_out(&self, session: &Session) -> DomainResult<()> {
        let response = self
            .http
            .post(self.auth_url("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer(session))
            .send()
            .await
            .map_err(send_err)?;

        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let store = RemoteStore::new("https://example.supabase.co/", "anon-key");
        assert_eq!(store.notes_url(), "https://example.supabase.co/rest/v1/notes");
        assert_eq!(store.auth_url("signup"), "https://example.supabase.co/auth/v1/signup");
    }

    #[test]
    fn test_insert_row_omits_missing_title() {
        let row = InsertRow {
            user_id: "u1",
            title: None,
            content: "hello",
            category: &Category::Work,
            is_pinned: false,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("title").is_none());
        assert_eq!(json["category"], "work");
    }

    #[test]
    fn test_auth_response_into_session() {
        let auth: AuthResponse = serde_json::from_value(serde_json::json!({
            "access_token": "tok",
            "user": { "id": "u1", "email": "ada@example.com",
                      "user_metadata": { "display_name": "Ada" } }
        }))
        .unwrap();
        let session = auth.into_session("fallback@example.com");
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.user.display_name.as_deref(), Some("Ada"));
        assert_eq!(session.access_token.as_deref(), Some("tok"));
    }
}
