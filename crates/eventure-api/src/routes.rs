use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{adventures, auth, badges, friends, memories};

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/api/user/profile", get(auth::profile))
        .route("/api/user/badges", get(badges::list_user_badges))
        .route("/api/badges", get(badges::list_badges))
        .route(
            "/api/adventures",
            get(adventures::list_adventures).post(adventures::create_adventure),
        )
        .route(
            "/api/memories",
            get(memories::list_memories).post(memories::create_memory),
        )
        .route("/api/friends", get(friends::list_friends))
        .route("/api/friends/search", get(friends::search))
        .route("/api/friends/request", post(friends::send_request))
        .route("/api/friends/requests", get(friends::list_requests))
        .route("/api/friends/requests/{request_id}/respond", post(friends::respond))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
