// src/routes.rs

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::updates,
    state::AppState,
    utils::auth::bridge_auth_middleware,
};

/// Assembles the main application router.
///
/// * `/api/updates` is reachable only with the bridge secret.
/// * `/api/health` is open.
/// * Every request is traced.
pub fn create_router(state: AppState) -> Router {
    let bridge_routes = Router::new()
        .route("/api/updates", post(updates::receive_update))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            bridge_auth_middleware,
        ));

    Router::new()
        .merge(bridge_routes)
        .route("/api/health", get(updates::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
