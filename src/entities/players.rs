use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Professional team label, e.g. "Lakers"
    pub team: String,

    pub position: String,

    pub age: i32,

    /// Height in meters
    pub height: f64,

    pub university: Option<String>,

    pub country: String,

    pub games_played: i32,

    pub points_per_game: f64,

    pub rebounds_per_game: f64,

    pub assists_per_game: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::roster_players::Entity")]
    RosterPlayers,
}

impl Related<super::roster_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RosterPlayers.def()
    }
}

impl Related<super::rosters::Entity> for Entity {
    fn to() -> RelationDef {
        super::roster_players::Relation::Roster.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::roster_players::Relation::Player.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
