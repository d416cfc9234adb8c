use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::PlayerId;
use crate::entities::{players, prelude::*};
use crate::models::NewPlayer;

const ROWS_PER_INSERT: usize = 80;

pub struct PlayerRepository {
    conn: DatabaseConnection,
}

impl PlayerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<players::Model>> {
        Players::find()
            .order_by_asc(players::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list players")
    }

    pub async fn get(&self, id: PlayerId) -> Result<Option<players::Model>> {
        Players::find_by_id(id.value())
            .one(&self.conn)
            .await
            .with_context(|| format!("Failed to query player {id}"))
    }

    /// Exact, case-sensitive match on the position label.
    pub async fn list_by_position(&self, position: &str) -> Result<Vec<players::Model>> {
        Players::find()
            .filter(players::Column::Position.eq(position))
            .order_by_asc(players::Column::Id)
            .all(&self.conn)
            .await
            .with_context(|| format!("Failed to list players for position {position}"))
    }

    pub async fn count(&self) -> Result<u64> {
        Players::find()
            .count(&self.conn)
            .await
            .context("Failed to count players")
    }

    /// Load catalog records in a single transaction; nothing is kept if any
    /// row fails.
    pub async fn insert_many(&self, records: Vec<NewPlayer>) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let count = records.len();
        let models: Vec<players::ActiveModel> = records
            .into_iter()
            .map(|p| players::ActiveModel {
                name: Set(p.name),
                team: Set(p.team),
                position: Set(p.position),
                age: Set(p.age),
                height: Set(p.height),
                university: Set(p.university),
                country: Set(p.country),
                games_played: Set(p.games_played),
                points_per_game: Set(p.points_per_game),
                rebounds_per_game: Set(p.rebounds_per_game),
                assists_per_game: Set(p.assists_per_game),
                ..Default::default()
            })
            .collect();

        let txn = self.conn.begin().await?;

        // Eleven bound columns per row.
        for chunk in models.chunks(ROWS_PER_INSERT) {
            Players::insert_many(chunk.to_vec())
                .exec(&txn)
                .await
                .context("Failed to insert players")?;
        }

        txn.commit().await?;
        Ok(count)
    }
}
