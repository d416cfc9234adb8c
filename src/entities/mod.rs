pub mod prelude;

pub mod players;
pub mod roster_players;
pub mod rosters;
pub mod users;
