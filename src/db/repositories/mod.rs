pub mod player;
pub mod roster;
pub mod user;
