use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    router::{RouteMatch, RouteMeta},
    session::SessionState,
};

/// Path of the login view the guard sends anonymous users to.
pub const LOGIN_PATH: &str = "/login";
/// Path of the home view the guard sends non-admin users to.
pub const HOME_PATH: &str = "/";

/// GuardDecision
///
/// The three possible outcomes of a navigation check. Exactly one is returned
/// for every input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardDecision {
    /// Where a redirect points, `None` for `Allow`.
    pub fn location(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

/// GuardPolicy
///
/// How the route flags are read.
///
/// * `Faithful` runs the two checks exactly as the shop front end does: auth
///   first, then admin. A route flagged admin-only without the auth flag is
///   only checked for the role, so an anonymous visitor lands on `/` rather
///   than `/login`.
/// * `Strict` treats `requires_admin` as implying `requires_auth`, which sends
///   that same visitor to `/login`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardPolicy {
    #[default]
    Faithful,
    Strict,
}

impl FromStr for GuardPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faithful" => Ok(GuardPolicy::Faithful),
            "strict" => Ok(GuardPolicy::Strict),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for GuardPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardPolicy::Faithful => f.write_str("faithful"),
            GuardPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// decide
///
/// The access check itself. Order matters: the auth check runs first, so a
/// route carrying both flags sends an anonymous visitor to login, not home.
pub fn decide(meta: RouteMeta, session: &SessionState, policy: GuardPolicy) -> GuardDecision {
    let requires_auth = match policy {
        GuardPolicy::Faithful => meta.requires_auth,
        GuardPolicy::Strict => meta.requires_auth || meta.requires_admin,
    };

    if requires_auth && !session.is_authenticated() {
        GuardDecision::RedirectToLogin
    } else if meta.requires_admin && !session.is_admin() {
        GuardDecision::RedirectToHome
    } else {
        GuardDecision::Allow
    }
}

/// NavigationGuard
///
/// Hook run before every transition. Implementations must be total and free of
/// side effects beyond the returned decision.
pub trait NavigationGuard: Send + Sync {
    fn before_each(
        &self,
        to: &RouteMatch,
        from: Option<&str>,
        session: &SessionState,
    ) -> GuardDecision;
}

/// AccessGuard
///
/// The shop's guard: checks the target route's `requiresAuth`/`requiresAdmin`
/// flags against the session. The previous path plays no part in the decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard {
    pub policy: GuardPolicy,
}

impl AccessGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self { policy }
    }
}

impl NavigationGuard for AccessGuard {
    fn before_each(
        &self,
        to: &RouteMatch,
        _from: Option<&str>,
        session: &SessionState,
    ) -> GuardDecision {
        decide(to.meta(), session, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> SessionState {
        SessionState::anonymous()
    }

    fn session(token: &str, role: &str) -> SessionState {
        SessionState::new(Some(token), Some(role))
    }

    const ADMIN_ONLY: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_admin: true,
    };

    #[test]
    fn anonymous_visitor_is_sent_to_login_for_auth_routes() {
        let decision = decide(RouteMeta::AUTH, &anonymous(), GuardPolicy::Faithful);
        assert_eq!(decision, GuardDecision::RedirectToLogin);
        assert_eq!(decision.location(), Some("/login"));
    }

    #[test]
    fn auth_check_precedes_admin_check() {
        let decision = decide(RouteMeta::ADMIN, &anonymous(), GuardPolicy::Faithful);
        assert_eq!(decision, GuardDecision::RedirectToLogin);
    }

    #[test]
    fn non_admin_is_sent_home() {
        let decision = decide(RouteMeta::ADMIN, &session("abc", "user"), GuardPolicy::Faithful);
        assert_eq!(decision, GuardDecision::RedirectToHome);
        assert_eq!(decision.location(), Some("/"));
    }

    #[test]
    fn token_without_role_is_not_admin() {
        let partial = SessionState::new(Some("abc"), None::<String>);
        assert_eq!(
            decide(RouteMeta::ADMIN, &partial, GuardPolicy::Faithful),
            GuardDecision::RedirectToHome
        );
    }

    #[test]
    fn admin_is_allowed() {
        let decision = decide(RouteMeta::ADMIN, &session("abc", "admin"), GuardPolicy::Faithful);
        assert_eq!(decision, GuardDecision::Allow);
        assert_eq!(decision.location(), None);
    }

    #[test]
    fn admin_only_route_skips_login_under_faithful_policy() {
        assert_eq!(
            decide(ADMIN_ONLY, &anonymous(), GuardPolicy::Faithful),
            GuardDecision::RedirectToHome
        );
        // A role with no token passes: only the role is checked.
        let role_only = SessionState::new(None::<String>, Some("admin"));
        assert_eq!(
            decide(ADMIN_ONLY, &role_only, GuardPolicy::Faithful),
            GuardDecision::Allow
        );
    }

    #[test]
    fn strict_policy_requires_login_for_admin_only_route() {
        assert_eq!(
            decide(ADMIN_ONLY, &anonymous(), GuardPolicy::Strict),
            GuardDecision::RedirectToLogin
        );
        let role_only = SessionState::new(None::<String>, Some("admin"));
        assert_eq!(
            decide(ADMIN_ONLY, &role_only, GuardPolicy::Strict),
            GuardDecision::RedirectToLogin
        );
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Strict".parse::<GuardPolicy>(), Ok(GuardPolicy::Strict));
        assert_eq!(" faithful ".parse::<GuardPolicy>(), Ok(GuardPolicy::Faithful));
        assert!("lenient".parse::<GuardPolicy>().is_err());
        assert_eq!(GuardPolicy::Strict.to_string(), "strict");
    }
}
