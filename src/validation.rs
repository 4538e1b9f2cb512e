//! Form-Boundary Validation
//!
//! Rules checked before any network or storage call. Failures here are
//! reported inline by the form and never reach the stores or the
//! view-model.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::{DomainError, DomainResult, NoteDraft, NotePatch};

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

/// `content` is the only field whose absence blocks submission
pub fn validate_draft(draft: &NoteDraft) -> DomainResult<()> {
    if draft.content.trim().is_empty() {
        return Err(DomainError::Validation("content is required".to_string()));
    }
    Ok(())
}

/// Edits obey the same rule: a patch may leave `content` alone, but may
/// not blank it out.
pub fn validate_patch(patch: &NotePatch) -> DomainResult<()> {
    if matches!(&patch.content, Some(content) if content.trim().is_empty()) {
        return Err(DomainError::Validation("content is required".to_string()));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 6
}

pub fn is_valid_display_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// Check sign-in / sign-up input before calling the auth provider
pub fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    if !is_valid_email(email) {
        return Err(DomainError::Validation("invalid email address".to_string()));
    }
    if !is_valid_password(password) {
        return Err(DomainError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}
