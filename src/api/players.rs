use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::parse_player_id;
use super::{ApiError, AppState};
use crate::models::{PlayerDetail, PlayerSummary, PositionPlayer};

/// GET /api/jugadores
pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
    let players = state.catalog_service().list_players().await?;
    Ok(Json(players))
}

/// GET /api/jugadores/{id}
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PlayerDetail>, ApiError> {
    let id = parse_player_id(&id)?;
    let player = state.catalog_service().get_player(id).await?;
    Ok(Json(player))
}

/// GET /api/jugadores_por_posicion/{posicion}
///
/// The segment is matched as given; a position nobody plays, blank or not,
/// is an empty list.
pub async fn list_players_by_position(
    State(state): State<Arc<AppState>>,
    Path(position): Path<String>,
) -> Result<Json<Vec<PositionPlayer>>, ApiError> {
    let players = state
        .catalog_service()
        .list_players_by_position(&position)
        .await?;
    Ok(Json(players))
}
