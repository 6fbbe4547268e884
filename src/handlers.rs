use crate::{
    AppState,
    apps::AppKind,
    models::{NavigateRequest, NavigateResponse, ResolvedRoute, RouteSummary},
    navigation::Navigator,
    session::SessionState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

// --- Query Structs ---

/// ResolveQuery
///
/// Query parameters for `GET /apps/{app}/resolve`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ResolveQuery {
    /// URL to resolve; may carry a query string and hash.
    pub path: String,
}

/// Looks up the navigator for the `{app}` path segment. Unknown apps are a 404.
fn navigator<'a>(state: &'a AppState, app: &str) -> Result<&'a Navigator, StatusCode> {
    let kind: AppKind = app.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(state.apps.get(kind))
}

// --- Handlers ---

/// list_routes
///
/// Lists every registered route of an app, in registration order.
#[utoipa::path(
    get,
    path = "/apps/{app}/routes",
    params(("app" = String, Path, description = "`client` or `todolist`")),
    responses(
        (status = 200, description = "Route table", body = [RouteSummary]),
        (status = 404, description = "Unknown app")
    )
)]
pub async fn list_routes(
    State(state): State<AppState>,
    Path(app): Path<String>,
) -> Result<Json<Vec<RouteSummary>>, StatusCode> {
    let navigator = navigator(&state, &app)?;
    Ok(Json(navigator.table().iter().map(RouteSummary::from).collect()))
}

/// resolve_route
///
/// Matches a URL against an app's table without running the guard.
#[utoipa::path(
    get,
    path = "/apps/{app}/resolve",
    params(
        ("app" = String, Path, description = "`client` or `todolist`"),
        ResolveQuery
    ),
    responses(
        (status = 200, description = "Matched route", body = ResolvedRoute),
        (status = 404, description = "Unknown app or no matching route")
    )
)]
pub async fn resolve_route(
    State(state): State<AppState>,
    Path(app): Path<String>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ResolvedRoute>, StatusCode> {
    let navigator = navigator(&state, &app)?;
    let hit = navigator
        .table()
        .resolve(&query.path)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(ResolvedRoute::from(&hit)))
}

/// navigate
///
/// Runs a full transition for the caller's session (bearer token and
/// `X-User-Role` headers): resolve the target, apply the app's guard, and
/// report whether to proceed or where to redirect. An unmatched target is not
/// an error here; it is reported as the `not_found` outcome.
#[utoipa::path(
    post,
    path = "/apps/{app}/navigate",
    params(("app" = String, Path, description = "`client` or `todolist`")),
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "Navigation outcome", body = NavigateResponse),
        (status = 404, description = "Unknown app")
    )
)]
pub async fn navigate(
    session: SessionState,
    State(state): State<AppState>,
    Path(app): Path<String>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<NavigateResponse>, StatusCode> {
    let navigator = navigator(&state, &app)?;
    let outcome = navigator.decide(&payload.to, payload.from.as_deref(), &session);
    Ok(Json(NavigateResponse::from(outcome)))
}
