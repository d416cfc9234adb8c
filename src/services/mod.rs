pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod roster_service;
pub mod roster_service_impl;
pub use roster_service::{RosterDraft, RosterError, RosterService};
pub use roster_service_impl::SeaOrmRosterService;
