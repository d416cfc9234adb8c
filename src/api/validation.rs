use super::ApiError;
use crate::domain::PlayerId;

/// Parses the `{id}` path segment. Anything that is not a positive integer
/// cannot name a player, so it is reported as not found.
pub fn parse_player_id(raw: &str) -> Result<PlayerId, ApiError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(PlayerId::new(id)),
        _ => Err(ApiError::not_found("Player", raw)),
    }
}

/// Only same-site absolute paths are followed after login.
#[must_use]
pub fn safe_redirect_target(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}
