//! Domain service for saving and listing a user's rosters.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{PlayerId, RosterId, UserId};
use crate::models::{NewRoster, Roster};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("You already have a team named '{0}'")]
    NameTaken(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for RosterError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for RosterError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A creation request as received from a client; every field may be absent.
///
/// `jugadores` entries are kept as raw JSON so that one entry which cannot
/// name a player does not reject the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterDraft {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "tipo")]
    pub roster_type: Option<String>,
    #[serde(rename = "jugadores")]
    pub player_ids: Option<Vec<serde_json::Value>>,
}

/// A positive integer that fits a player id; anything else names no player.
fn player_id_from_json(value: &serde_json::Value) -> Option<PlayerId> {
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .filter(|n| *n > 0)
        .map(PlayerId::new)
}

impl RosterDraft {
    /// Checks that name, type and player list are all present and non-empty.
    ///
    /// Entries of the player list that cannot be a player id are dropped
    /// here, the same way unknown ids are skipped when the roster is saved.
    pub fn validate(self) -> Result<NewRoster, RosterError> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        let roster_type = self.roster_type.as_deref().map(str::trim).unwrap_or_default();
        let raw_ids = self.player_ids.unwrap_or_default();

        if name.is_empty() || roster_type.is_empty() || raw_ids.is_empty() {
            return Err(RosterError::Validation("Incomplete data".to_string()));
        }

        let player_ids: Vec<PlayerId> = raw_ids.iter().filter_map(player_id_from_json).collect();
        if player_ids.len() < raw_ids.len() {
            tracing::debug!(
                dropped = raw_ids.len() - player_ids.len(),
                "Ignored player list entries that are not valid ids"
            );
        }

        Ok(NewRoster {
            name: name.to_string(),
            roster_type: roster_type.to_string(),
            player_ids,
        })
    }
}

#[async_trait::async_trait]
pub trait RosterService: Send + Sync {
    /// Saves a roster for `owner`.
    ///
    /// Player ids that are not in the catalog are skipped rather than failing
    /// the request.
    ///
    /// # Errors
    ///
    /// [`RosterError::Validation`] for missing fields,
    /// [`RosterError::NameTaken`] if `owner` already has a roster with this name.
    async fn create_roster(&self, owner: UserId, draft: RosterDraft)
    -> Result<RosterId, RosterError>;

    /// The owner's rosters, newest first.
    async fn list_rosters_for_owner(&self, owner: UserId) -> Result<Vec<Roster>, RosterError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, roster_type: &str, ids: &[i32]) -> RosterDraft {
        RosterDraft {
            name: Some(name.to_string()),
            roster_type: Some(roster_type.to_string()),
            player_ids: Some(ids.iter().copied().map(serde_json::Value::from).collect()),
        }
    }

    #[test]
    fn validate_accepts_complete_draft() {
        let roster = draft("  DreamTeam ", "fantasy", &[1, 2]).validate().unwrap();
        assert_eq!(roster.name, "DreamTeam");
        assert_eq!(roster.player_ids.len(), 2);
    }

    #[test]
    fn validate_rejects_missing_pieces() {
        assert!(draft("", "fantasy", &[1]).validate().is_err());
        assert!(draft("DreamTeam", " ", &[1]).validate().is_err());
        assert!(draft("DreamTeam", "fantasy", &[]).validate().is_err());
        assert!(RosterDraft::default().validate().is_err());
    }

    #[test]
    fn draft_reads_wire_names() {
        let draft: RosterDraft =
            serde_json::from_str(r#"{"nombre":"A","tipo":"fantasy","jugadores":[3,4]}"#).unwrap();
        assert_eq!(draft.name.as_deref(), Some("A"));
        assert_eq!(
            draft.validate().unwrap().player_ids,
            vec![PlayerId::new(3), PlayerId::new(4)]
        );
    }

    #[test]
    fn entries_that_cannot_be_ids_are_dropped() {
        let draft: RosterDraft = serde_json::from_str(
            r#"{"nombre":"Big","tipo":"fantasy","jugadores":[1,3000000000,-2,0,2.5,"x",null,7]}"#,
        )
        .unwrap();

        let roster = draft.validate().unwrap();
        assert_eq!(roster.player_ids, vec![PlayerId::new(1), PlayerId::new(7)]);
    }

    #[test]
    fn list_of_only_bad_entries_still_counts_as_given() {
        let draft: RosterDraft =
            serde_json::from_str(r#"{"nombre":"Big","tipo":"fantasy","jugadores":[3000000000]}"#)
                .unwrap();

        assert!(draft.validate().unwrap().player_ids.is_empty());
    }
}
