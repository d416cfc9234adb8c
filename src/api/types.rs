use serde::Serialize;

use crate::domain::RosterId;

/// Body of every failed API call.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateRosterResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "equipo_id")]
    pub roster_id: RosterId,
}

impl CreateRosterResponse {
    #[must_use]
    pub fn created(roster_id: RosterId) -> Self {
        Self {
            success: true,
            message: "Team created successfully".to_string(),
            roster_id,
        }
    }
}
