use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use std::collections::HashSet;

use crate::domain::{PlayerId, RosterId, UserId};
use crate::entities::{players, prelude::*, roster_players, rosters};
use crate::models::{CreatedRoster, NewRoster, PlayerSummary, Roster};

/// Ids bound per statement; stays well under SQLite's variable limit, which
/// is 999 on older builds.
const ID_CHUNK: usize = 400;

pub struct RosterRepository {
    conn: DatabaseConnection,
}

impl RosterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create a roster and its memberships in one transaction.
    ///
    /// Returns `Ok(None)` when the owner already has a roster with this name,
    /// whether caught by the lookup or by the unique index on insert. Ids that
    /// do not resolve to a player are skipped; a repeated id is attached once.
    /// Any error drops the transaction uncommitted, which rolls it back.
    pub async fn create(&self, owner: UserId, roster: &NewRoster) -> Result<Option<CreatedRoster>> {
        let txn = self.conn.begin().await?;

        let taken = Rosters::find()
            .filter(rosters::Column::UserId.eq(owner.value()))
            .filter(rosters::Column::Name.eq(roster.name.as_str()))
            .one(&txn)
            .await
            .context("Failed to check roster name")?
            .is_some();

        if taken {
            return Ok(None);
        }

        let insert = Rosters::insert(rosters::ActiveModel {
            user_id: Set(owner.value()),
            name: Set(roster.name.clone()),
            roster_type: Set(roster.roster_type.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .exec(&txn)
        .await;

        let roster_id = match insert {
            Ok(res) => res.last_insert_id,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Ok(None);
            }
            Err(err) => return Err(err).context("Failed to insert roster"),
        };

        let mut seen = HashSet::new();
        let requested: Vec<PlayerId> = roster
            .player_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let mut existing: HashSet<i32> = HashSet::with_capacity(requested.len());
        for chunk in requested.chunks(ID_CHUNK) {
            let found = Players::find()
                .select_only()
                .column(players::Column::Id)
                .filter(players::Column::Id.is_in(chunk.iter().map(|id| id.value())))
                .into_tuple::<i32>()
                .all(&txn)
                .await
                .context("Failed to resolve roster players")?;
            existing.extend(found);
        }

        let (attached, skipped): (Vec<PlayerId>, Vec<PlayerId>) = requested
            .into_iter()
            .partition(|id| existing.contains(&id.value()));

        for chunk in attached.chunks(ID_CHUNK) {
            let memberships = chunk.iter().map(|player_id| roster_players::ActiveModel {
                roster_id: Set(roster_id),
                player_id: Set(player_id.value()),
            });

            RosterPlayers::insert_many(memberships)
                .exec(&txn)
                .await
                .context("Failed to attach roster players")?;
        }

        txn.commit().await?;

        Ok(Some(CreatedRoster {
            id: RosterId::new(roster_id),
            attached,
            skipped,
        }))
    }

    /// Owner's rosters, newest first, each with its players.
    pub async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Roster>> {
        let models = Rosters::find()
            .filter(rosters::Column::UserId.eq(owner.value()))
            .order_by_desc(rosters::Column::CreatedAt)
            .order_by_desc(rosters::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list rosters")?;

        let members = models
            .load_many_to_many(
                Players::find().order_by_asc(players::Column::Id),
                RosterPlayers,
                &self.conn,
            )
            .await
            .context("Failed to load roster players")?;

        Ok(models
            .into_iter()
            .zip(members)
            .map(|(model, players)| Roster {
                id: RosterId::new(model.id),
                name: model.name,
                roster_type: model.roster_type,
                created_at: model.created_at,
                players: players.into_iter().map(PlayerSummary::from).collect(),
            })
            .collect())
    }

    pub async fn count_for_owner(&self, owner: UserId) -> Result<u64> {
        Rosters::find()
            .filter(rosters::Column::UserId.eq(owner.value()))
            .count(&self.conn)
            .await
            .context("Failed to count rosters")
    }

    pub async fn member_ids(&self, roster: RosterId) -> Result<Vec<PlayerId>> {
        let ids = RosterPlayers::find()
            .select_only()
            .column(roster_players::Column::PlayerId)
            .filter(roster_players::Column::RosterId.eq(roster.value()))
            .order_by_asc(roster_players::Column::PlayerId)
            .into_tuple::<i32>()
            .all(&self.conn)
            .await
            .context("Failed to load roster members")?;

        Ok(ids.into_iter().map(PlayerId::new).collect())
    }
}
