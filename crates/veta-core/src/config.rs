use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    };

    let env = parse_environment(&or_default("VETA_ENV", "development"))?;
    let log_level = or_default("VETA_LOG_LEVEL", "info");
    let lexicon_path = optional_path("VETA_LEXICON_PATH");
    let plan_path = optional_path("VETA_PLAN_PATH");

    let language = or_default("VETA_LANGUAGE", "en").trim().to_lowercase();
    if language.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "VETA_LANGUAGE".to_string(),
            reason: "language tag must be non-empty".to_string(),
        });
    }

    let raw_workers = or_default("VETA_WORKERS", "4");
    let workers = raw_workers
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "VETA_WORKERS".to_string(),
            reason: e.to_string(),
        })?;
    if workers == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VETA_WORKERS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        lexicon_path,
        plan_path,
        language,
        workers,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VETA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
