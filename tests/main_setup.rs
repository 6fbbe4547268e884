use coffee_nav::{
    AppConfig, ConfigError, GuardPolicy,
    config::{DEFAULT_BIND_ADDR, Env},
};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 3] = ["APP_ENV", "BIND_ADDR", "GUARD_POLICY"];

/// Runs `test` with the given variables set (or removed when `None`), then
/// restores whatever the process had before.
fn run_with_env<T, R>(vars: &[(&'static str, Option<&str>)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            if let Some(value) = value {
                env::set_var(key, value);
            }
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(&[("APP_ENV", Some("local"))], AppConfig::load).unwrap();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(config.guard_policy, GuardPolicy::Faithful);
}

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(&[("APP_ENV", Some("production"))], AppConfig::load);

    assert_eq!(
        result.unwrap_err(),
        ConfigError::MissingProductionVar("BIND_ADDR")
    );
}

#[test]
#[serial]
fn test_app_config_production_with_bind_addr() {
    let config = run_with_env(
        &[
            ("APP_ENV", Some("production")),
            ("BIND_ADDR", Some("127.0.0.1:8080")),
            ("GUARD_POLICY", Some("strict")),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.guard_policy, GuardPolicy::Strict);
}

#[test]
#[serial]
fn test_app_config_rejects_unknown_guard_policy() {
    let result = run_with_env(&[("GUARD_POLICY", Some("lenient"))], AppConfig::load);

    assert_eq!(
        result.unwrap_err(),
        ConfigError::InvalidValue {
            var: "GUARD_POLICY",
            value: "lenient".to_string()
        }
    );
}

#[test]
fn test_app_config_default_is_local_and_faithful() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert_eq!(config.guard_policy, GuardPolicy::Faithful);
}
