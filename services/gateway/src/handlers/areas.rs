//! Geography listing endpoints
//!
//! Serves the bundled reference tables as GeoJSON-shaped listings for the
//! map layer. Planning areas render as point features at their centroids;
//! district features carry their postal prefixes and no geometry.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use georef::{district_names, planning_area_names, PLANNING_AREAS, POSTAL_DISTRICTS};

use crate::auth::{AuthenticatedUser, Tier};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/areas/planning` — public planning-area listing.
pub async fn planning(State(_state): State<AppState>) -> Json<Value> {
    let features: Vec<Value> = PLANNING_AREAS
        .iter()
        .map(|area| {
            json!({
                "type": "Feature",
                "properties": {
                    "name": area.key,
                    "planningAreaName": area.key,
                    "displayName": area.name,
                },
                "geometry": {"type": "Point", "coordinates": area.center},
            })
        })
        .collect();

    Json(json!({
        "type": "FeatureCollection",
        "features": features,
        "meta": {
            "source": "static-definitions",
            "planningAreas": planning_area_names(),
        },
    }))
}

/// `GET /api/areas/districts` — district listing. Pro and above.
pub async fn districts(
    State(_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Value>, ApiError> {
    user.require(Tier::Pro)?;

    let features: Vec<Value> = POSTAL_DISTRICTS
        .iter()
        .map(|district| {
            json!({
                "type": "Feature",
                "properties": {
                    "code": district.code,
                    "name": district.name,
                    "postalCodes": district.postal_prefixes,
                },
                "geometry": Value::Null,
            })
        })
        .collect();

    let listing: Vec<Value> = district_names()
        .into_iter()
        .map(|(code, name)| json!({"code": code, "name": name}))
        .collect();

    Ok(Json(json!({
        "type": "FeatureCollection",
        "features": features,
        "meta": {
            "source": "static-definitions",
            "districts": listing,
        },
    })))
}
