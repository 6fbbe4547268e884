use std::env;

use crate::{error::ConfigError, guard::GuardPolicy};

/// AppConfig
///
/// Holds the service's entire configuration. Immutable once loaded and pulled into
/// handlers through the shared `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and which variables are mandatory.
    pub env: Env,
    // Socket address the HTTP listener binds to.
    pub bind_addr: String,
    // How the shop guard reads `requiresAdmin` on routes that lack `requiresAuth`.
    pub guard_policy: GuardPolicy,
}

/// Env
///
/// Runtime context: pretty logs and relaxed defaults locally, JSON logs and
/// explicit settings in production.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

impl Default for AppConfig {
    /// Test scaffolding that needs no environment variables.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            guard_policy: GuardPolicy::Faithful,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads `APP_ENV`, `BIND_ADDR` and `GUARD_POLICY`. In production the bind
    /// address has to be given explicitly; an unparsable guard policy is always
    /// an error rather than a silent fallback.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = match (env, env::var("BIND_ADDR")) {
            (_, Ok(addr)) if !addr.trim().is_empty() => addr,
            (Env::Production, _) => return Err(ConfigError::MissingProductionVar("BIND_ADDR")),
            (Env::Local, _) => DEFAULT_BIND_ADDR.to_string(),
        };

        let guard_policy = match env::var("GUARD_POLICY") {
            Ok(value) => value
                .parse::<GuardPolicy>()
                .map_err(|value| ConfigError::InvalidValue {
                    var: "GUARD_POLICY",
                    value,
                })?,
            Err(_) => GuardPolicy::default(),
        };

        Ok(Self {
            env,
            bind_addr,
            guard_policy,
        })
    }
}
