use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, session_store::ExpiredDeletion};
use tower_sessions_sqlx_store::SqliteStore;

use time;

use crate::config::Config;
use crate::state::SharedState;

mod assets;
pub mod auth;
mod error;
pub mod flash;
mod observability;
mod pages;
mod players;
mod rosters;
mod types;
mod validation;

pub use error::ApiError;
pub use pages::PageError;
pub use types::*;

use crate::services::{AuthService, CatalogService, RosterService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn roster_service(&self) -> &Arc<dyn RosterService> {
        &self.shared.roster_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Build the full application: public auth routes, gated pages, the gated
/// JSON API and embedded static files. Sessions live in the application
/// database.
pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let (secure_cookies, inactivity_minutes) = {
        let server = &state.config().server;
        (server.secure_cookies, server.session_inactivity_minutes)
    };

    let session_store = SqliteStore::new(state.store().conn.get_sqlite_connection_pool().clone());
    session_store.migrate().await?;
    if let Err(e) = session_store.delete_expired().await {
        tracing::warn!("Failed to purge expired sessions: {e}");
    }

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            inactivity_minutes,
        )));

    Ok(Router::new()
        .route("/login", get(pages::login_page).post(auth::login))
        .route("/register", post(auth::register))
        .merge(create_page_router())
        .nest("/api", create_api_router())
        .route("/static/{*path}", get(assets::serve_static))
        .fallback(pages::not_found)
        .layer(session_layer)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        )))
}

fn create_page_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::index))
        .route("/armar_equipo", get(pages::roster_builder))
        .route("/mis_equipos", get(pages::my_rosters))
        .route("/logout", get(auth::logout))
        .route_layer(middleware::from_fn(auth::require_page_session))
}

fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jugadores", get(players::list_players))
        .route("/jugadores/{id}", get(players::get_player))
        .route(
            "/jugadores_por_posicion/{posicion}",
            get(players::list_players_by_position),
        )
        .route("/crear_equipo", post(rosters::create_roster))
        .route("/mis_equipos", get(rosters::list_my_rosters))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::require_api_session))
}
