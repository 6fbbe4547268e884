use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    guard::GuardDecision,
    navigation::Navigation,
    router::{Access, RouteDescriptor, RouteMatch, RouteMeta},
};

// --- Response Schemas ---

/// RouteSummary
///
/// Public view of a registered route, as listed by `GET /apps/{app}/routes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    #[schema(example = "/person/:personId")]
    pub path: String,
    pub name: Option<String>,
    #[schema(example = "PersonView")]
    pub view: String,
    pub meta: RouteMeta,
    pub access: Access,
}

impl From<&RouteDescriptor> for RouteSummary {
    fn from(route: &RouteDescriptor) -> Self {
        Self {
            path: route.path.to_string(),
            name: route.name.clone(),
            view: route.view.as_str().to_string(),
            meta: route.meta,
            access: route.meta.access(),
        }
    }
}

/// ResolvedRoute
///
/// A route matched against a concrete URL, with the captured parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ResolvedRoute {
    pub route: RouteSummary,
    /// The concrete path that was matched, without query or hash.
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl From<&RouteMatch> for ResolvedRoute {
    fn from(hit: &RouteMatch) -> Self {
        Self {
            route: RouteSummary::from(&hit.route),
            path: hit.path.clone(),
            params: hit.params.clone(),
            query: hit.query.clone(),
            hash: hit.hash.clone(),
        }
    }
}

/// Outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    Proceed,
    Redirect,
    NotFound,
}

/// NavigateResponse
///
/// What the front end should do with a requested transition. `location` is set
/// only for redirects; `route` is the route to render (the redirect target when
/// redirected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigateResponse {
    pub outcome: Outcome,
    pub location: Option<String>,
    pub reason: Option<GuardDecision>,
    pub route: Option<ResolvedRoute>,
}

impl From<Navigation> for NavigateResponse {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::Proceed(hit) => Self {
                outcome: Outcome::Proceed,
                location: None,
                reason: Some(GuardDecision::Allow),
                route: Some(ResolvedRoute::from(&hit)),
            },
            Navigation::Redirect {
                location,
                reason,
                route,
            } => Self {
                outcome: Outcome::Redirect,
                location: Some(location.to_string()),
                reason: Some(reason),
                route: route.as_ref().map(ResolvedRoute::from),
            },
            Navigation::NotFound { .. } => Self {
                outcome: Outcome::NotFound,
                location: None,
                reason: None,
                route: None,
            },
        }
    }
}

// --- Request Payloads ---

/// NavigateRequest
///
/// Input for `POST /apps/{app}/navigate`. The session travels in headers.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigateRequest {
    #[schema(example = "/admin/products")]
    pub to: String,
    #[serde(default)]
    pub from: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_serializes_as_snake_case() {
        let response = NavigateResponse::from(Navigation::NotFound {
            path: "/x".into(),
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["outcome"], "not_found");
        assert!(json["route"].is_null());
    }

    #[test]
    fn navigate_request_from_is_optional() {
        let request: NavigateRequest = serde_json::from_str(r#"{"to":"/todo"}"#).unwrap();
        assert_eq!(request.to, "/todo");
        assert!(request.from.is_none());
    }
}
