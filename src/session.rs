use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{PoisonError, RwLock},
};

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

/// Storage key holding the opaque session token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the user's role.
pub const ROLE_KEY: &str = "role";
/// The only role value that grants access to admin routes.
pub const ADMIN_ROLE: &str = "admin";
/// Request header carrying the role alongside the bearer token.
pub const ROLE_HEADER: &str = "x-user-role";

/// SessionState
///
/// Snapshot of the current user's authentication token and role. The token is
/// opaque; its mere presence is the only liveness signal. Empty strings are
/// treated as absent, matching how the front ends test `!token`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: Option<impl Into<String>>, role: Option<impl Into<String>>) -> Self {
        Self {
            token: token.map(Into::into).filter(|t: &String| !t.is_empty()),
            role: role.map(Into::into).filter(|r: &String| !r.is_empty()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Exact, case-sensitive comparison with `"admin"`. An absent role is never admin.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// SessionStore
///
/// The key-value store the front ends persist `token` and `role` in. Login and
/// logout flows write to it; navigation only ever reads a `snapshot`.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);

    /// Reads `token` and `role` together so a navigation never observes half
    /// of a concurrent login/logout.
    fn snapshot(&self) -> SessionState;
}

/// MemorySessionStore
///
/// In-process store. One lock guards the whole map, so `snapshot`, `login` and
/// `logout` are each atomic with respect to one another.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes both keys under a single lock.
    pub fn login(&self, token: impl Into<String>, role: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(TOKEN_KEY.to_string(), token.into());
        entries.insert(ROLE_KEY.to_string(), role.into());
    }

    pub fn logout(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(TOKEN_KEY);
        entries.remove(ROLE_KEY);
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn snapshot(&self) -> SessionState {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        SessionState::new(entries.get(TOKEN_KEY).cloned(), entries.get(ROLE_KEY).cloned())
    }
}

/// SessionState Extractor Implementation
///
/// Lets HTTP handlers receive the caller's session directly. The token comes from
/// `Authorization: Bearer <token>` and the role from `X-User-Role`. Nothing is
/// validated here: a missing or malformed header simply yields an absent value,
/// and the guard decides what that means.
impl<S> FromRequestParts<S> for SessionState
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        let role = parts
            .headers
            .get(ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim);

        Ok(SessionState::new(token, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn empty_values_count_as_absent() {
        let session = SessionState::new(Some(""), Some(""));
        assert_eq!(session, SessionState::anonymous());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn admin_role_is_exact_match() {
        assert!(SessionState::new(Some("t"), Some("admin")).is_admin());
        assert!(!SessionState::new(Some("t"), Some("Admin")).is_admin());
        assert!(!SessionState::new(Some("t"), None::<String>).is_admin());
    }

    #[test]
    fn store_login_logout_round() {
        let store = MemorySessionStore::new();
        assert_eq!(store.snapshot(), SessionState::anonymous());

        store.login("abc", "user");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(store.snapshot(), SessionState::new(Some("abc"), Some("user")));

        store.set(ROLE_KEY, "admin".to_string());
        assert!(store.snapshot().is_admin());

        store.remove(ROLE_KEY);
        let partial = store.snapshot();
        assert!(partial.is_authenticated());
        assert!(!partial.is_admin());

        store.logout();
        assert_eq!(store.snapshot(), SessionState::anonymous());
    }

    #[test]
    fn snapshot_never_sees_half_a_login() {
        use std::{
            sync::{
                Arc,
                atomic::{AtomicBool, Ordering},
            },
            thread,
        };

        let store = Arc::new(MemorySessionStore::new());
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for _ in 0..5_000 {
                    store.login("t", "admin");
                    store.logout();
                }
                done.store(true, Ordering::Release);
            })
        };

        let logged_in = SessionState::new(Some("t"), Some("admin"));
        let mut reads = 0;
        while !done.load(Ordering::Acquire) || reads == 0 {
            let snapshot = store.snapshot();
            assert!(
                snapshot == SessionState::anonymous() || snapshot == logged_in,
                "torn session snapshot: {snapshot:?}"
            );
            reads += 1;
        }

        writer.join().unwrap();
        assert_eq!(store.snapshot(), SessionState::anonymous());
    }

    #[tokio::test]
    async fn extracts_session_from_headers() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Bearer abc")
            .header(ROLE_HEADER, "admin")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let session = SessionState::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(session, SessionState::new(Some("abc"), Some("admin")));
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_ignored() {
        let request = Request::builder()
            .header(header::AUTHORIZATION, "Basic Zm9vOmJhcg==")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let session = SessionState::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(session, SessionState::anonymous());
    }
}
