use crate::handlers;
use crate::middleware;
use crate::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Auth routes
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/me", get(handlers::auth::me))
        // Event routes - Public
        .route("/api/events", get(handlers::events::list_events))
        .route("/api/events/:id", get(handlers::events::get_event))
        // Event routes - Protected
        .route(
            "/api/events/:id/register",
            post(handlers::events::register_for_event)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .route(
            "/api/registrations/mine",
            get(handlers::events::my_registrations)
                .route_layer(from_fn_with_state(state.clone(), middleware::require_auth)),
        )
        .with_state(state)
}
