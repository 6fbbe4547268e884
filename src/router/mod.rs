//! Route Table
//!
//! Ordered registry of route descriptors plus the resolver that maps a URL to
//! the most specific matching descriptor. Tables are assembled once at startup
//! and shared read-only (`Arc<RouteTable>`) afterwards.

pub mod descriptor;
pub mod pattern;

use std::collections::HashMap;

pub use descriptor::{Access, RouteDescriptor, RouteMeta, View};
pub use pattern::{Params, PathPattern, Segment, Specificity};

use crate::error::RouteError;

/// RouteMatch
///
/// Result of resolving a URL against a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: RouteDescriptor,
    pub params: Params,
    /// The path part of the resolved URL, without query or hash.
    pub path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl RouteMatch {
    pub fn meta(&self) -> RouteMeta {
        self.route.meta
    }

    pub fn name(&self) -> Option<&str> {
        self.route.name.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    names: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and registers a static list of `(path, name, view, meta)` entries.
    pub fn from_routes<'a, I>(entries: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>, &'a str, RouteMeta)>,
    {
        let mut table = Self::new();
        for (path, name, view, meta) in entries {
            let mut route = RouteDescriptor::new(path, view)?.with_meta(meta);
            route.name = name.map(str::to_string);
            table.register(route);
        }
        Ok(table)
    }

    /// Adds a descriptor. Duplicate names and duplicate patterns are reported
    /// but never rejected: a later name shadows an earlier one for name lookup,
    /// and an earlier pattern keeps winning resolution ties.
    pub fn register(&mut self, route: RouteDescriptor) {
        if self.routes.iter().any(|r| r.path == route.path) {
            tracing::warn!(path = %route.path, "route pattern registered more than once");
        }
        if route.meta.is_inconsistent() {
            tracing::debug!(path = %route.path, "route requires admin without requiring auth");
        }

        let index = self.routes.len();
        if let Some(name) = &route.name {
            if let Some(previous) = self.names.insert(name.clone(), index) {
                tracing::warn!(
                    name = %name,
                    previous = %self.routes[previous].path,
                    path = %route.path,
                    "duplicate route name"
                );
            }
        }
        self.routes.push(route);
    }

    /// Resolves a URL (path with optional `?query` and `#hash`) to the most
    /// specific matching route. Ties go to the earliest registration.
    pub fn resolve(&self, url: &str) -> Option<RouteMatch> {
        let (rest, hash) = match url.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (url, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        let mut best: Option<(&RouteDescriptor, Params, Specificity)> = None;
        for route in &self.routes {
            let Some(params) = route.path.matches(path) else {
                continue;
            };
            let specificity = route.path.specificity();
            let better = best
                .as_ref()
                .map_or(true, |(_, _, current)| specificity > *current);
            if better {
                best = Some((route, params, specificity));
            }
        }

        best.map(|(route, params, _)| RouteMatch {
            route: route.clone(),
            params,
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            query,
            hash,
        })
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.names.get(name).map(|&index| &self.routes[index])
    }

    /// Reverse resolution: the concrete path for a named route.
    pub fn path_for(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        self.by_name(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?
            .path
            .interpolate(params)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
