//! Sign-up form handling and auth screen status.
//!
//! Admin authentication itself lives with the external identity provider;
//! this client only offers the one-time admin bootstrap call.

use crate::error::{ClientError, ClientResult};

pub const ADMIN_BOOTSTRAP_NOTICE: &str =
    "Admin bootstrap attempted. Use your identity provider account to sign in as admin.";

/// Fields entered on the student sign-up screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    /// Check required fields before anything is sent
    pub fn validate(&self) -> ClientResult<()> {
        if self.name.is_empty() {
            return Err(ClientError::Validation("Full name is required".to_string()));
        }
        if self.email.is_empty() {
            return Err(ClientError::Validation("Email is required".to_string()));
        }
        if !looks_like_email(&self.email) {
            return Err(ClientError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        if self.password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Feedback shown under the auth form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthStatus {
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AuthStatus {
    pub fn failed(&mut self, err: &ClientError) {
        self.error = Some(err.message().to_string());
        self.notice = None;
    }

    pub fn noticed(&mut self, notice: &str) {
        self.error = None;
        self.notice = Some(notice.to_string());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
