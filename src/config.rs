//! Backend Configuration
//!
//! The hosting shell picks a backend at startup: the hosted store (remote
//! URL + anon key) or the on-device database. Settings come from the
//! environment, with `.env` files honored in development.

use std::env;
use std::path::PathBuf;

use crate::domain::{DomainError, DomainResult};

const DEFAULT_DB_FILE: &str = "quillnotes.db";

/// Which store backs the app, and how to reach it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Remote { base_url: String, api_key: String },
    Local { db_path: PathBuf },
}

impl BackendConfig {
    /// Read the backend selection from the environment.
    ///
    /// `QUILLNOTES_BACKEND` is `remote` or `local` (default `local`).
    /// Remote requires `QUILLNOTES_REMOTE_URL` and `QUILLNOTES_API_KEY`;
    /// local honors `QUILLNOTES_DB_PATH`.
    pub fn from_env() -> DomainResult<Self> {
        // A missing .env file is fine; real env vars still apply
        let _ = dotenvy::dotenv();

        let backend = env::var("QUILLNOTES_BACKEND").unwrap_or_else(|_| "local".to_string());
        match backend.as_str() {
            "remote" => {
                let base_url = require_var("QUILLNOTES_REMOTE_URL")?;
                let api_key = require_var("QUILLNOTES_API_KEY")?;
                Ok(BackendConfig::Remote { base_url, api_key })
            }
            "local" => {
                let db_path = env::var("QUILLNOTES_DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE));
                Ok(BackendConfig::Local { db_path })
            }
            other => Err(DomainError::Validation(format!(
                "unknown backend '{other}' (expected 'remote' or 'local')"
            ))),
        }
    }
}

fn require_var(name: &str) -> DomainResult<String> {
    env::var(name).map_err(|_| DomainError::Validation(format!("{name} is required")))
}
