mod import_players;
mod players;

pub use import_players::cmd_import_players;
pub use players::cmd_list_players;
