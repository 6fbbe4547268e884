//! The two single-page applications served by this crate.

pub mod client;
pub mod todolist;

use std::{fmt, str::FromStr, sync::Arc};

use crate::{
    error::RouteError,
    guard::{AccessGuard, GuardPolicy},
    navigation::Navigator,
};

/// AppKind
///
/// Identifies a front end in URLs (`/apps/{app}/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    Client,
    Todolist,
}

impl AppKind {
    pub const ALL: [AppKind; 2] = [AppKind::Client, AppKind::Todolist];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppKind::Client => "client",
            AppKind::Todolist => "todolist",
        }
    }
}

impl FromStr for AppKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(AppKind::Client),
            "todolist" => Ok(AppKind::Todolist),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apps
///
/// One navigator per front end, built once at startup.
#[derive(Clone)]
pub struct Apps {
    pub client: Navigator,
    pub todolist: Navigator,
}

impl Apps {
    pub fn build(policy: GuardPolicy) -> Result<Self, RouteError> {
        let client = Navigator::new(Arc::new(client::routes()?))
            .with_guard(Arc::new(AccessGuard::new(policy)));
        let todolist = Navigator::new(Arc::new(todolist::routes()?));

        tracing::info!(
            client_routes = client.table().len(),
            todolist_routes = todolist.table().len(),
            %policy,
            "route tables registered"
        );

        Ok(Self { client, todolist })
    }

    pub fn get(&self, kind: AppKind) -> &Navigator {
        match kind {
            AppKind::Client => &self.client,
            AppKind::Todolist => &self.todolist,
        }
    }
}
