use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints the front ends call before rendering a view. None of them reject a
/// request for lack of a session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /apps/{app}/routes
        // The app's full route table with access requirements.
        .route("/apps/{app}/routes", get(handlers::list_routes))
        // GET /apps/{app}/resolve?path=...
        // Pure route matching, no guard.
        .route("/apps/{app}/resolve", get(handlers::resolve_route))
        // POST /apps/{app}/navigate
        // Route matching plus the app's navigation guard for the caller's session.
        .route("/apps/{app}/navigate", post(handlers::navigate))
}
