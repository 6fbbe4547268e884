use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use super::pattern::PathPattern;
use crate::error::RouteError;

/// View
///
/// Opaque reference to the presentation component rendered for a route
/// (e.g. `CoffeView`). The navigation core never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct View(pub String);

impl View {
    pub fn new(component: impl Into<String>) -> Self {
        Self(component.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// RouteMeta
///
/// The access requirements a route declares. Both flags default to `false`.
/// `requires_admin` is meant to imply `requires_auth`, but nothing here enforces
/// it: the data is kept exactly as declared and the guard policy decides how to
/// read it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

/// Access
///
/// Tagged projection of `RouteMeta`. The admin flag wins over the auth flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Access {
    Public,
    AuthRequired,
    AdminRequired,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self {
        requires_auth: false,
        requires_admin: false,
    };
    pub const AUTH: Self = Self {
        requires_auth: true,
        requires_admin: false,
    };
    pub const ADMIN: Self = Self {
        requires_auth: true,
        requires_admin: true,
    };

    pub fn access(&self) -> Access {
        if self.requires_admin {
            Access::AdminRequired
        } else if self.requires_auth {
            Access::AuthRequired
        } else {
            Access::Public
        }
    }

    /// True when the flags disagree with the intended policy (admin without auth).
    pub fn is_inconsistent(&self) -> bool {
        self.requires_admin && !self.requires_auth
    }
}

/// RouteDescriptor
///
/// Static mapping from a URL pattern to a view and its access requirements.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: PathPattern,
    pub name: Option<String>,
    pub view: View,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(path: &str, view: impl Into<String>) -> Result<Self, RouteError> {
        Ok(Self {
            path: PathPattern::parse(path)?,
            name: None,
            view: View::new(view),
            meta: RouteMeta::default(),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn requires_admin(mut self) -> Self {
        self.meta.requires_admin = true;
        self
    }

    pub fn with_meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }
}
