//! `SeaORM` implementation of the `RosterService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::domain::{RosterId, UserId};
use crate::models::Roster;
use crate::services::roster_service::{RosterDraft, RosterError, RosterService};

pub struct SeaOrmRosterService {
    store: Store,
}

impl SeaOrmRosterService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RosterService for SeaOrmRosterService {
    async fn create_roster(
        &self,
        owner: UserId,
        draft: RosterDraft,
    ) -> Result<RosterId, RosterError> {
        let roster = draft.validate()?;

        let created = self
            .store
            .create_roster(owner, &roster)
            .await?
            .ok_or_else(|| RosterError::NameTaken(roster.name.clone()))?;

        if !created.skipped.is_empty() {
            debug!(
                roster_id = %created.id,
                skipped = ?created.skipped,
                "Ignored player ids not present in the catalog"
            );
        }

        metrics::counter!("rosters_created_total").increment(1);
        info!(
            user_id = %owner,
            roster_id = %created.id,
            players = created.attached.len(),
            "Roster '{}' created",
            roster.name
        );

        Ok(created.id)
    }

    async fn list_rosters_for_owner(&self, owner: UserId) -> Result<Vec<Roster>, RosterError> {
        Ok(self.store.list_rosters_for_owner(owner).await?)
    }
}
