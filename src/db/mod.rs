use crate::config::SecurityConfig;
use crate::domain::{PlayerId, RosterId, UserId};
use crate::entities::players;
use crate::models::{CreatedRoster, NewPlayer, NewRoster, Roster};
use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn player_repo(&self) -> repositories::player::PlayerRepository {
        repositories::player::PlayerRepository::new(self.conn.clone())
    }

    fn roster_repo(&self) -> repositories::roster::RosterRepository {
        repositories::roster::RosterRepository::new(self.conn.clone())
    }

    // Users

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo().create(username, password, config).await
    }

    pub async fn verify_user_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_credentials(username, password)
            .await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    // Player catalog

    pub async fn list_players(&self) -> Result<Vec<players::Model>> {
        self.player_repo().list_all().await
    }

    pub async fn get_player(&self, id: PlayerId) -> Result<Option<players::Model>> {
        self.player_repo().get(id).await
    }

    pub async fn list_players_by_position(&self, position: &str) -> Result<Vec<players::Model>> {
        self.player_repo().list_by_position(position).await
    }

    pub async fn insert_players(&self, records: Vec<NewPlayer>) -> Result<usize> {
        self.player_repo().insert_many(records).await
    }

    pub async fn count_players(&self) -> Result<u64> {
        self.player_repo().count().await
    }

    // Rosters

    pub async fn create_roster(
        &self,
        owner: UserId,
        roster: &NewRoster,
    ) -> Result<Option<CreatedRoster>> {
        self.roster_repo().create(owner, roster).await
    }

    pub async fn list_rosters_for_owner(&self, owner: UserId) -> Result<Vec<Roster>> {
        self.roster_repo().list_for_owner(owner).await
    }

    pub async fn count_rosters_for_owner(&self, owner: UserId) -> Result<u64> {
        self.roster_repo().count_for_owner(owner).await
    }

    pub async fn roster_member_ids(&self, roster: RosterId) -> Result<Vec<PlayerId>> {
        self.roster_repo().member_ids(roster).await
    }
}

/// Whether `err` wraps a unique-index violation reported by the database.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)))
}
