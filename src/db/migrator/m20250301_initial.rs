use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::Name).string().not_null())
                    .col(ColumnDef::new(Players::Team).string().not_null())
                    .col(ColumnDef::new(Players::Position).string().not_null())
                    .col(ColumnDef::new(Players::Age).integer().not_null())
                    .col(ColumnDef::new(Players::Height).double().not_null())
                    .col(ColumnDef::new(Players::University).string().null())
                    .col(ColumnDef::new(Players::Country).string().not_null())
                    .col(ColumnDef::new(Players::GamesPlayed).integer().not_null())
                    .col(ColumnDef::new(Players::PointsPerGame).double().not_null())
                    .col(ColumnDef::new(Players::ReboundsPerGame).double().not_null())
                    .col(ColumnDef::new(Players::AssistsPerGame).double().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_players_position")
                    .table(Players::Table)
                    .col(Players::Position)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Rosters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rosters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rosters::UserId).integer().not_null())
                    .col(ColumnDef::new(Rosters::Name).string().not_null())
                    .col(ColumnDef::new(Rosters::RosterType).string().not_null())
                    .col(
                        ColumnDef::new(Rosters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rosters_user_id")
                            .from(Rosters::Table, Rosters::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Concurrent creations of the same name race past the service's
        // existence check; this index is what makes the loser fail.
        manager
            .create_index(
                Index::create()
                    .name("idx_rosters_user_name")
                    .table(Rosters::Table)
                    .col(Rosters::UserId)
                    .col(Rosters::Name)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RosterPlayers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RosterPlayers::RosterId).integer().not_null())
                    .col(ColumnDef::new(RosterPlayers::PlayerId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_roster_players")
                            .col(RosterPlayers::RosterId)
                            .col(RosterPlayers::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roster_players_roster_id")
                            .from(RosterPlayers::Table, RosterPlayers::RosterId)
                            .to(Rosters::Table, Rosters::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_roster_players_player_id")
                            .from(RosterPlayers::Table, RosterPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RosterPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rosters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    Name,
    Team,
    Position,
    Age,
    Height,
    University,
    Country,
    GamesPlayed,
    PointsPerGame,
    ReboundsPerGame,
    AssistsPerGame,
}

#[derive(DeriveIden)]
enum Rosters {
    Table,
    Id,
    UserId,
    Name,
    RosterType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RosterPlayers {
    Table,
    RosterId,
    PlayerId,
}
