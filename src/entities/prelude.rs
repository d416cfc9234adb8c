pub use super::players::Entity as Players;
pub use super::roster_players::Entity as RosterPlayers;
pub use super::rosters::Entity as Rosters;
pub use super::users::Entity as Users;
