use axum::{
    Form,
    extract::{FromRequestParts, Query, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::flash::{self, FlashLevel};
use super::observability::record_user_id;
use super::validation::safe_redirect_target;
use super::{ApiError, AppState, PageError};
use crate::domain::CurrentUser;
use crate::services::AuthError;

const SESSION_USER_KEY: &str = "user";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
}

// ============================================================================
// Session gate
// ============================================================================

/// Read the logged-in identity, if any.
pub async fn session_user(session: &Session) -> Option<CurrentUser> {
    match session.get::<CurrentUser>(SESSION_USER_KEY).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Session error: {e}");
            None
        }
    }
}

/// Gate for HTML pages: anonymous visitors are sent to the login page with
/// the requested path in `next`.
pub async fn require_page_session(
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(user) = session_user(&session).await {
        record_user_id(&request, user.id);
        request.extensions_mut().insert(user);
        return next.run(request).await;
    }

    let original = request
        .uri()
        .path_and_query()
        .map_or("/", |pq| pq.as_str())
        .to_string();

    flash::push(
        &session,
        FlashLevel::Info,
        "Please log in to access this page.",
    )
    .await;

    Redirect::to(&format!("/login?next={}", urlencoding::encode(&original))).into_response()
}

/// Gate for JSON endpoints: anonymous calls get a 401 body instead of a redirect.
pub async fn require_api_session(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = session_user(&session)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    record_user_id(&request, user.id);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
    }
}

/// Store the identity under a fresh session id.
async fn start_session(session: &Session, user: &CurrentUser) -> Result<(), PageError> {
    session
        .cycle_id()
        .await
        .map_err(|e| PageError::Internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| PageError::Internal(format!("Failed to create session: {e}")))
}

fn login_location(next: Option<&str>) -> String {
    next.map_or_else(
        || "/login".to_string(),
        |n| format!("/login?next={}", urlencoding::encode(n)),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NextQuery>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, PageError> {
    match state
        .auth_service()
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => {
            start_session(&session, &user).await?;
            tracing::info!(user_id = %user.id, "User {} logged in", user.username);
            flash::push(&session, FlashLevel::Success, "Logged in successfully!").await;
            Ok(Redirect::to(safe_redirect_target(query.next.as_deref())))
        }
        Err(AuthError::InvalidCredentials) => {
            flash::push(
                &session,
                FlashLevel::Danger,
                AuthError::InvalidCredentials.to_string(),
            )
            .await;
            Ok(Redirect::to(&login_location(query.next.as_deref())))
        }
        Err(e) => Err(PageError::Internal(format!("Login failed: {e}"))),
    }
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, PageError> {
    tracing::info!("Registration attempt for user: {}", form.username);

    match state
        .auth_service()
        .register(&form.username, &form.password, &form.password_confirm)
        .await
    {
        Ok(user) => {
            start_session(&session, &user).await?;
            flash::push(&session, FlashLevel::Success, "Registration successful. Welcome!").await;
            Ok(Redirect::to("/"))
        }
        Err(e @ (AuthError::Validation(_) | AuthError::UsernameTaken(_))) => {
            let message = match e {
                AuthError::Validation(msg) => msg,
                other => other.to_string(),
            };
            flash::push(&session, FlashLevel::Danger, message).await;
            Ok(Redirect::to("/login"))
        }
        Err(e) => {
            tracing::error!("Registration error: {e}");
            flash::push(
                &session,
                FlashLevel::Danger,
                "Registration failed. Please try again.",
            )
            .await;
            Ok(Redirect::to("/login"))
        }
    }
}

/// GET /logout
pub async fn logout(user: CurrentUser, session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to flush session: {e}");
    }
    tracing::info!(user_id = %user.id, "User {} logged out", user.username);
    flash::push(&session, FlashLevel::Success, "You have been logged out.").await;
    Redirect::to("/login")
}
