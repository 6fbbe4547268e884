use axum::{Router, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Navigation core: route tables, the guard and the session it reads.
pub mod apps;
pub mod guard;
pub mod navigation;
pub mod router;
pub mod session;

// Service plumbing.
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
use routes::public;

// --- Public Re-exports ---

pub use apps::{AppKind, Apps};
pub use config::AppConfig;
pub use error::{ConfigError, RouteError};
pub use guard::{AccessGuard, GuardDecision, GuardPolicy, NavigationGuard};
pub use navigation::{Navigation, Navigator};
pub use router::{RouteDescriptor, RouteMatch, RouteMeta, RouteTable};
pub use session::{MemorySessionStore, SessionState, SessionStore};

/// ApiDoc
///
/// OpenAPI document for the navigation endpoints, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_routes, handlers::resolve_route, handlers::navigate),
    components(
        schemas(
            models::RouteSummary, models::ResolvedRoute, models::NavigateRequest,
            models::NavigateResponse, models::Outcome, router::RouteMeta, router::Access,
            guard::GuardDecision,
        )
    ),
    tags(
        (name = "coffee-nav", description = "Route resolution and navigation guard for the shop and to-do front ends")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable state: the per-app navigators and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub apps: Apps,
    pub config: AppConfig,
}

impl AppState {
    /// Builds both route tables with the configured guard policy.
    pub fn new(config: AppConfig) -> Result<Self, RouteError> {
        let apps = Apps::build(config.guard_policy)?;
        Ok(Self { apps, config })
    }
}

/// create_router
///
/// Assembles the HTTP routes, the documentation endpoints and the observability
/// layers around the shared state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, uri and the `x-request-id` set by the layer above.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
