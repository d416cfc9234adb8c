//! Catalog projections.
//!
//! Field names on the wire are the Spanish ones the team-builder front end
//! reads (`nombre`, `posicion`, `puntos_por_partido`, ...).

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::entities::players;

/// Row shown in the full catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "equipo")]
    pub team: String,
    #[serde(rename = "posicion")]
    pub position: String,
    #[serde(rename = "edad")]
    pub age: i32,
    #[serde(rename = "altura")]
    pub height: f64,
    #[serde(rename = "puntos_por_partido")]
    pub points_per_game: f64,
}

impl From<players::Model> for PlayerSummary {
    fn from(model: players::Model) -> Self {
        Self {
            id: PlayerId::new(model.id),
            name: model.name,
            team: model.team,
            position: model.position,
            age: model.age,
            height: model.height,
            points_per_game: model.points_per_game,
        }
    }
}

/// Everything the catalog knows about one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerDetail {
    pub id: PlayerId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "equipo")]
    pub team: String,
    #[serde(rename = "posicion")]
    pub position: String,
    #[serde(rename = "edad")]
    pub age: i32,
    #[serde(rename = "altura")]
    pub height: f64,
    #[serde(rename = "universidad")]
    pub university: Option<String>,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "partidos_jugados")]
    pub games_played: i32,
    #[serde(rename = "puntos_por_partido")]
    pub points_per_game: f64,
    #[serde(rename = "rebotes_por_partido")]
    pub rebounds_per_game: f64,
    #[serde(rename = "asistencias_por_partido")]
    pub assists_per_game: f64,
}

impl From<players::Model> for PlayerDetail {
    fn from(model: players::Model) -> Self {
        Self {
            id: PlayerId::new(model.id),
            name: model.name,
            team: model.team,
            position: model.position,
            age: model.age,
            height: model.height,
            university: model.university,
            country: model.country,
            games_played: model.games_played,
            points_per_game: model.points_per_game,
            rebounds_per_game: model.rebounds_per_game,
            assists_per_game: model.assists_per_game,
        }
    }
}

/// Row returned when browsing one position; carries the per-game stat line
/// the builder shows on each card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionPlayer {
    pub id: PlayerId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "equipo")]
    pub team: String,
    #[serde(rename = "posicion")]
    pub position: String,
    #[serde(rename = "puntos_por_partido")]
    pub points_per_game: f64,
    #[serde(rename = "rebotes_por_partido")]
    pub rebounds_per_game: f64,
    #[serde(rename = "asistencias_por_partido")]
    pub assists_per_game: f64,
}

impl From<players::Model> for PositionPlayer {
    fn from(model: players::Model) -> Self {
        Self {
            id: PlayerId::new(model.id),
            name: model.name,
            team: model.team,
            position: model.position,
            points_per_game: model.points_per_game,
            rebounds_per_game: model.rebounds_per_game,
            assists_per_game: model.assists_per_game,
        }
    }
}

/// A catalog record as read from an import file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewPlayer {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "equipo")]
    pub team: String,
    #[serde(rename = "posicion")]
    pub position: String,
    #[serde(rename = "edad")]
    pub age: i32,
    #[serde(rename = "altura")]
    pub height: f64,
    #[serde(rename = "universidad", default)]
    pub university: Option<String>,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "partidos_jugados", default)]
    pub games_played: i32,
    #[serde(rename = "puntos_por_partido", default)]
    pub points_per_game: f64,
    #[serde(rename = "rebotes_por_partido", default)]
    pub rebounds_per_game: f64,
    #[serde(rename = "asistencias_por_partido", default)]
    pub assists_per_game: f64,
}
