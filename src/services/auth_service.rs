//! Domain service for registration and credential checks.
//!
//! Session state is not handled here: the HTTP layer stores the returned
//! identity in the session after a successful call.

use thiserror::Error;

use crate::domain::CurrentUser;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Deliberately the same for an unknown user and a wrong password.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a user and returns the identity to log in.
    ///
    /// # Errors
    ///
    /// [`AuthError::Validation`] if a field is empty or the passwords differ,
    /// [`AuthError::UsernameTaken`] if the username exists.
    async fn register(
        &self,
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<CurrentUser, AuthError>;

    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails for any reason
    /// related to the supplied credentials.
    async fn authenticate(&self, username: &str, password: &str)
    -> Result<CurrentUser, AuthError>;
}
