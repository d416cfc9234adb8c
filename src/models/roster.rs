use chrono::{DateTime, Utc};
use serde::Serialize;

use super::player::PlayerSummary;
use crate::domain::{PlayerId, RosterId};

/// Input for creating a roster, already validated by the roster service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoster {
    pub name: String,
    pub roster_type: String,
    pub player_ids: Vec<PlayerId>,
}

/// Outcome of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoster {
    pub id: RosterId,
    /// Players that existed and were attached, in request order.
    pub attached: Vec<PlayerId>,
    /// Requested ids that did not resolve to a catalog player.
    pub skipped: Vec<PlayerId>,
}

/// A saved roster with its members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    pub id: RosterId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub roster_type: String,
    #[serde(rename = "fecha_creacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "jugadores")]
    pub players: Vec<PlayerSummary>,
}
