//! Watchlist endpoints. Pro and above throughout.
//!
//! The per-tier entry cap lives here: pro accounts hold up to
//! `MAX_WATCHLIST` areas, enterprise accounts are uncapped.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::auth::{AuthenticatedUser, Tier};
use crate::error::ApiError;
use crate::models::WatchlistAddRequest;
use crate::state::AppState;

const MAX_WATCHLIST: i64 = 10;

fn validated_level(level: Option<&str>) -> Result<&str, ApiError> {
    match level {
        None => Ok("planning_area"),
        Some("planning_area") | Some("district") => Ok(level.unwrap_or("planning_area")),
        Some(_) => Err(ApiError::BadRequest(
            "level must be \"planning_area\" or \"district\"".into(),
        )),
    }
}

/// `GET /api/areas/watchlist`
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    user.require(Tier::Pro)?;
    let entries = state.watchlist.list(&user.id).await?;
    Ok(Json(json!({"watchlist": entries})))
}

/// `POST /api/areas/watchlist`
pub async fn add(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<WatchlistAddRequest>,
) -> Result<impl IntoResponse, ApiError> {
    user.require(Tier::Pro)?;

    let area_name = payload.area_name.trim().to_uppercase();
    if area_name.is_empty() {
        return Err(ApiError::BadRequest("Missing required field: area_name".into()));
    }
    let level = validated_level(payload.level.as_deref())?;

    if user.tier != Tier::Enterprise {
        let current = state.watchlist.count(&user.id).await?;
        if current >= MAX_WATCHLIST {
            return Err(ApiError::BadRequest(format!(
                "Watchlist limit reached ({MAX_WATCHLIST})."
            )));
        }
    }

    match state.watchlist.add(&user.id, &area_name, level).await? {
        Some(entry) => Ok((StatusCode::CREATED, Json(json!({"watchlistItem": entry})))),
        None => Err(ApiError::Conflict("Area is already in your watchlist".into())),
    }
}

/// `DELETE /api/areas/watchlist/:id`
pub async fn remove(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    user.require(Tier::Pro)?;

    if !state.watchlist.remove(id, &user.id).await? {
        return Err(ApiError::NotFound("Watchlist item not found".into()));
    }
    Ok(Json(json!({"message": "Watchlist item removed", "id": id})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_level() {
        assert_eq!(validated_level(None).unwrap(), "planning_area");
        assert_eq!(validated_level(Some("district")).unwrap(), "district");
        assert!(validated_level(Some("region")).is_err());
    }
}
