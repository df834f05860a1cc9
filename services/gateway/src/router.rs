use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{areas, health, resale, user, watchlist};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let hdb_routes = Router::new()
        .route("/metrics/summary", get(resale::summary))
        .route("/metrics", get(resale::metrics))
        .route("/transactions", get(resale::transactions))
        .route("/export", get(resale::export))
        .route("/status", get(resale::status))
        .route("/refresh", post(resale::refresh));

    let areas_routes = Router::new()
        .route("/planning", get(areas::planning))
        .route("/districts", get(areas::districts))
        .route("/watchlist", get(watchlist::list).post(watchlist::add))
        .route("/watchlist/:id", delete(watchlist::remove));

    let user_routes = Router::new()
        .route("/profile", get(user::profile).put(user::update_profile))
        .route("/tier", get(user::tier))
        .route("/admin-setup", post(user::admin_setup));

    Router::new()
        .route("/api/health", get(health::health))
        .nest("/api/hdb", hdb_routes)
        .nest("/api/areas", areas_routes)
        .nest("/api/user", user_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
