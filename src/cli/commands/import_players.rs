//! Import catalog players command handler

use anyhow::Context;
use std::path::Path;

use crate::config::Config;
use crate::db::Store;
use crate::models::NewPlayer;
use crate::services::{CatalogService, SeaOrmCatalogService};

pub async fn cmd_import_players(config: &Config, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let records: Vec<NewPlayer> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of players", path.display()))?;

    if records.is_empty() {
        println!("No players found in {}", path.display());
        return Ok(());
    }

    let store = Store::new(&config.general.database_path).await?;
    let catalog = SeaOrmCatalogService::new(store.clone());

    let imported = catalog.import_players(records).await?;
    let total = store.count_players().await?;

    println!("✓ Imported {imported} players ({total} in catalog)");
    Ok(())
}
