use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::{ApiError, AppState, CreateRosterResponse};
use crate::domain::CurrentUser;
use crate::models::Roster;
use crate::services::RosterDraft;

/// POST /api/crear_equipo
///
/// A body that is not a JSON object, or whose fields have the wrong shape,
/// is reported with the same 400 as a missing field.
pub async fn create_roster(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    payload: Result<Json<RosterDraft>, JsonRejection>,
) -> Result<Json<CreateRosterResponse>, ApiError> {
    let Json(draft) = payload.map_err(|e| {
        tracing::debug!("Rejected roster payload: {e}");
        ApiError::validation("Incomplete data")
    })?;

    let roster_id = state.roster_service().create_roster(user.id, draft).await?;

    Ok(Json(CreateRosterResponse::created(roster_id)))
}

/// GET /api/mis_equipos
pub async fn list_my_rosters(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<Roster>>, ApiError> {
    let rosters = state
        .roster_service()
        .list_rosters_for_owner(user.id)
        .await?;
    Ok(Json(rosters))
}
