//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use crate::db::{Store, User, is_unique_violation};
use crate::domain::CurrentUser;
use crate::services::auth_service::{AuthError, AuthService};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

fn identity(user: User) -> CurrentUser {
    CurrentUser {
        id: user.id,
        username: user.username,
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<CurrentUser, AuthError> {
        let username = username.trim();

        if username.is_empty() || password.is_empty() || password_confirm.is_empty() {
            return Err(AuthError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        if password != password_confirm {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        // A concurrent registration can still win between the lookup and the
        // insert; the unique index turns that into the same conflict.
        let user = match self
            .store
            .create_user(username, password, &self.security)
            .await
        {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                return Err(AuthError::UsernameTaken(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        metrics::counter!("users_registered_total").increment(1);
        info!(user_id = %user.id, "User {} registered", user.username);

        Ok(identity(user))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<CurrentUser, AuthError> {
        // Usernames are stored trimmed.
        let username = username.trim();

        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        match self
            .store
            .verify_user_credentials(username, password)
            .await?
        {
            Some(user) => Ok(identity(user)),
            None => {
                metrics::counter!("login_failures_total").increment(1);
                warn!("Failed login attempt");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}
