//! Identity provider contract
//!
//! Sign-in is delegated to an external provider. The trait covers the three
//! entry paths (email sign-in, email sign-up, federated Google sign-in) and
//! yields an [`AuthUser`] whose id scopes every project query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// An authenticated user as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Provider-issued identifier
    pub id: UserId,
    /// Account email, absent for some federated accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Create a user record from an id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            email: None,
            display_name: None,
        }
    }

    /// With email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// With display name
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Sign-in failures surfaced to the login surface
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Wrong email or password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Sign-up attempted for an existing account
    #[error("an account already exists for '{0}'")]
    AccountExists(String),

    /// No user is signed in
    #[error("no authenticated user")]
    NotSignedIn,

    /// Anything the provider reports beyond credential problems
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl IdentityError {
    /// Whether the failure is fixable by retyping credentials
    #[inline]
    #[must_use]
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            IdentityError::InvalidCredentials | IdentityError::AccountExists(_)
        )
    }
}

/// External identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with an email and password
    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, IdentityError>;

    /// Create an account with an email and password, signing in on success
    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, IdentityError>;

    /// Federated Google sign-in
    async fn sign_in_with_google(&self) -> Result<AuthUser, IdentityError>;

    /// End the current session
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// The signed-in user, if any
    fn current_user(&self) -> Option<AuthUser>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_user_builder() {
        let user = AuthUser::new("u1")
            .with_email("sarah@example.com")
            .with_display_name("Sarah Johnson");
        assert_eq!(user.id.as_str(), "u1");
        assert_eq!(user.email.as_deref(), Some("sarah@example.com"));
    }

    #[test]
    fn credential_failures_are_classified() {
        assert!(IdentityError::InvalidCredentials.is_credential_failure());
        assert!(IdentityError::AccountExists("a@b.c".to_string()).is_credential_failure());
        assert!(!IdentityError::Provider("down".to_string()).is_credential_failure());
    }

    #[test]
    fn error_messages_read_plainly() {
        let err = IdentityError::AccountExists("sarah@example.com".to_string());
        assert_eq!(
            err.to_string(),
            "an account already exists for 'sarah@example.com'"
        );
    }
}
