//! Account endpoints: profile read/update, tier inspection, and the
//! service-key-guarded tier assignment used for operator setup.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};

use crate::auth::{AuthenticatedUser, Tier};
use crate::error::ApiError;
use crate::models::{AdminSetupRequest, ProfileUpdateRequest};
use crate::state::AppState;

/// The feature matrix shown to clients per tier.
fn tier_features(tier: Tier) -> Value {
    match tier {
        Tier::Free => json!({
            "planningArea": true, "district": false,
            "timeRanges": ["12m"], "flatTypeFilter": false,
            "yoyTrend": false, "vs5yrAvg": false, "exportCsv": false,
            "watchlist": false, "maxTransactions": 3,
        }),
        Tier::Pro => json!({
            "planningArea": true, "district": true,
            "timeRanges": ["3m", "6m", "12m", "3y", "5y", "all"], "flatTypeFilter": true,
            "yoyTrend": true, "vs5yrAvg": true, "exportCsv": true,
            "watchlist": true, "maxWatchlist": 10, "maxTransactions": -1,
        }),
        Tier::Enterprise => json!({
            "planningArea": true, "district": true,
            "timeRanges": ["3m", "6m", "12m", "3y", "5y", "all"], "flatTypeFilter": true,
            "yoyTrend": true, "vs5yrAvg": true, "exportCsv": true,
            "watchlist": true, "maxWatchlist": -1, "maxTransactions": -1,
            "apiAccess": true,
        }),
    }
}

/// `GET /api/user/profile`
pub async fn profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, ApiError> {
    let profile = state
        .profiles
        .get_or_create(&user.id, user.email.as_deref())
        .await?;

    Ok(Json(json!({
        "user": {
            "id": profile.id,
            "email": profile.email,
            "displayName": profile.display_name,
            "tier": user.tier,
            "features": tier_features(user.tier),
            "createdAt": profile.created_at,
        }
    })))
}

/// `PUT /api/user/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    let display_name = payload.display_name.trim();
    if display_name.len() > 100 {
        return Err(ApiError::BadRequest(
            "displayName must be a string of 100 characters or fewer".into(),
        ));
    }

    let profile = state
        .profiles
        .upsert_display_name(&user.id, user.email.as_deref(), display_name)
        .await?;

    Ok(Json(json!({
        "user": {
            "id": profile.id,
            "email": profile.email,
            "displayName": profile.display_name,
            "tier": Tier::parse(&profile.tier),
        }
    })))
}

/// `GET /api/user/tier`
pub async fn tier(user: AuthenticatedUser) -> Json<Value> {
    Json(json!({
        "tier": user.tier,
        "features": tier_features(user.tier),
    }))
}

/// `POST /api/user/admin-setup` — operator tier assignment, guarded by the
/// service key.
pub async fn admin_setup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AdminSetupRequest>,
) -> Result<Json<Value>, ApiError> {
    let authorized = match (&state.config.service_key, headers.get(header::AUTHORIZATION)) {
        (Some(key), Some(value)) => value
            .to_str()
            .map(|v| v == format!("Bearer {key}"))
            .unwrap_or(false),
        _ => false,
    };
    if !authorized {
        return Err(ApiError::Unauthorized("Unauthorized".into()));
    }

    if payload.user_id.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing userId, email, or tier".into()));
    }
    let tier = match payload.tier.as_str() {
        "free" | "pro" | "enterprise" => payload.tier.as_str(),
        _ => {
            return Err(ApiError::BadRequest(
                "tier must be one of free, pro, enterprise".into(),
            ))
        }
    };

    let profile = state
        .profiles
        .set_tier(
            &payload.user_id,
            &payload.email,
            payload.display_name.as_deref(),
            tier,
        )
        .await?;

    Ok(Json(json!({"profile": profile})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_matrix_monotone() {
        let free = tier_features(Tier::Free);
        let pro = tier_features(Tier::Pro);
        let enterprise = tier_features(Tier::Enterprise);

        assert_eq!(free["district"], json!(false));
        assert_eq!(pro["district"], json!(true));
        assert_eq!(free["maxTransactions"], json!(3));
        assert_eq!(pro["maxTransactions"], json!(-1));
        assert_eq!(pro["maxWatchlist"], json!(10));
        assert_eq!(enterprise["maxWatchlist"], json!(-1));
        assert_eq!(enterprise["apiAccess"], json!(true));
    }
}
