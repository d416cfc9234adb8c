//! `SeaORM` implementation of the `CatalogService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::Store;
use crate::domain::PlayerId;
use crate::models::{NewPlayer, PlayerDetail, PlayerSummary, PositionPlayer};
use crate::services::catalog_service::{CatalogError, CatalogService};

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_players(&self) -> Result<Vec<PlayerSummary>, CatalogError> {
        let players = self.store.list_players().await?;
        Ok(players.into_iter().map(PlayerSummary::from).collect())
    }

    async fn get_player(&self, id: PlayerId) -> Result<PlayerDetail, CatalogError> {
        self.store
            .get_player(id)
            .await?
            .map(PlayerDetail::from)
            .ok_or(CatalogError::NotFound(id))
    }

    async fn list_players_by_position(
        &self,
        position: &str,
    ) -> Result<Vec<PositionPlayer>, CatalogError> {
        let players = self.store.list_players_by_position(position).await?;
        Ok(players.into_iter().map(PositionPlayer::from).collect())
    }

    async fn import_players(&self, records: Vec<NewPlayer>) -> Result<usize, CatalogError> {
        if let Some(bad) = records
            .iter()
            .find(|p| p.name.trim().is_empty() || p.position.trim().is_empty())
        {
            return Err(CatalogError::Validation(format!(
                "Player record is missing a name or position: {bad:?}"
            )));
        }

        let count = self.store.insert_players(records).await?;
        info!("Imported {count} players into the catalog");
        Ok(count)
    }
}
