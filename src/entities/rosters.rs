use sea_orm::entity::prelude::*;

/// A named, user-owned team. `(user_id, name)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rosters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    pub name: String,

    /// Free-form type tag chosen by the client (e.g. "fantasy")
    pub roster_type: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::roster_players::Entity")]
    RosterPlayers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::roster_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RosterPlayers.def()
    }
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        super::roster_players::Relation::Player.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::roster_players::Relation::Roster.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
