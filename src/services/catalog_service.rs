//! Read access to the player catalog.

use thiserror::Error;

use crate::domain::PlayerId;
use crate::models::{NewPlayer, PlayerDetail, PlayerSummary, PositionPlayer};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Player {0} not found")]
    NotFound(PlayerId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Every player, ordered by id.
    async fn list_players(&self) -> Result<Vec<PlayerSummary>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no player has this id.
    async fn get_player(&self, id: PlayerId) -> Result<PlayerDetail, CatalogError>;

    /// Players whose position equals `position` exactly. An unmatched position
    /// yields an empty list.
    async fn list_players_by_position(
        &self,
        position: &str,
    ) -> Result<Vec<PositionPlayer>, CatalogError>;

    /// Bulk-load catalog records; all or nothing.
    async fn import_players(&self, records: Vec<NewPlayer>) -> Result<usize, CatalogError>;
}
