pub mod player;
pub mod roster;

pub use player::{NewPlayer, PlayerDetail, PlayerSummary, PositionPlayer};
pub use roster::{CreatedRoster, NewRoster, Roster};
