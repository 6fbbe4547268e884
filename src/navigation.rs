use std::sync::Arc;

use crate::{
    guard::{GuardDecision, NavigationGuard},
    router::{RouteMatch, RouteTable},
    session::{SessionState, SessionStore},
};

/// Navigation
///
/// Outcome of a complete transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The guard let the transition through unchanged.
    Proceed(RouteMatch),
    /// The guard sent the user elsewhere. `route` is the redirect target as
    /// resolved against the same table (absent if the table has no such route).
    Redirect {
        location: &'static str,
        reason: GuardDecision,
        route: Option<RouteMatch>,
    },
    /// No route matches the requested path.
    NotFound { path: String },
}

/// Navigator
///
/// Ties a route table to its (optional) guard. The todolist front end has no
/// guard, so every resolved route proceeds.
#[derive(Clone)]
pub struct Navigator {
    table: Arc<RouteTable>,
    guard: Option<Arc<dyn NavigationGuard>>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table, guard: None }
    }

    pub fn with_guard(mut self, guard: Arc<dyn NavigationGuard>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Resolves `to`, runs the guard with the given session and follows at most
    /// one redirect. The redirect target is not guarded again: `/login` and `/`
    /// are public in every table this crate defines.
    pub fn decide(&self, to: &str, from: Option<&str>, session: &SessionState) -> Navigation {
        let Some(target) = self.table.resolve(to) else {
            tracing::debug!(to, "no route matches");
            return Navigation::NotFound {
                path: to.to_string(),
            };
        };

        let decision = self
            .guard
            .as_ref()
            .map_or(GuardDecision::Allow, |guard| {
                guard.before_each(&target, from, session)
            });

        tracing::debug!(
            to = %target.path,
            from = from.unwrap_or("-"),
            route = target.name().unwrap_or("-"),
            ?decision,
            "navigation guard"
        );

        match decision.location() {
            None => Navigation::Proceed(target),
            Some(location) => Navigation::Redirect {
                location,
                reason: decision,
                route: self.table.resolve(location),
            },
        }
    }

    /// Same as `decide`, reading the session from a store in one snapshot.
    pub fn navigate(&self, to: &str, from: Option<&str>, store: &dyn SessionStore) -> Navigation {
        let session = store.snapshot();
        self.decide(to, from, &session)
    }
}
