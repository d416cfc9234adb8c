//! List catalog players command handler

use crate::config::Config;
use crate::db::Store;
use crate::services::{CatalogService, SeaOrmCatalogService};

pub async fn cmd_list_players(config: &Config, position: Option<&str>) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let catalog = SeaOrmCatalogService::new(store);

    if let Some(position) = position {
        let players = catalog.list_players_by_position(position).await?;
        if players.is_empty() {
            println!("No players listed as {position}.");
            return Ok(());
        }

        println!("{position} ({} players)", players.len());
        println!("{:-<70}", "");
        for p in players {
            println!(
                "[{}] {} ({}) {:.1} pts | {:.1} reb | {:.1} ast",
                p.id,
                p.name,
                p.team,
                p.points_per_game,
                p.rebounds_per_game,
                p.assists_per_game
            );
        }
        return Ok(());
    }

    let players = catalog.list_players().await?;
    if players.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Load players with: courtside import-players players.json");
        return Ok(());
    }

    println!("Player Catalog ({} total)", players.len());
    println!("{:-<70}", "");
    for p in players {
        println!(
            "[{}] {} - {} | {} | {} yrs, {:.2} m | {:.1} pts",
            p.id, p.name, p.position, p.team, p.age, p.height, p.points_per_game
        );
    }

    Ok(())
}
