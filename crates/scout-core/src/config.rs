use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("SCOUT_ENV", "development"))?;

    let bind_addr = parse_addr("SCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SCOUT_LOG_LEVEL", "info");
    let games_path = PathBuf::from(or_default("SCOUT_GAMES_PATH", "./config/games.yaml"));

    let db_max_connections = parse_u32("SCOUT_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SCOUT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SCOUT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(invalid(
            "SCOUT_DB_MIN_CONNECTIONS",
            format!("must not exceed SCOUT_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }

    let rescore_cron = or_default("SCOUT_RESCORE_CRON", "0 15 */6 * * *");
    if rescore_cron.split_whitespace().count() != 6 {
        return Err(invalid(
            "SCOUT_RESCORE_CRON",
            "expected six space-separated fields (sec min hour dom mon dow)".to_string(),
        ));
    }

    let rescore_stale_hours = or_default("SCOUT_RESCORE_STALE_HOURS", "6")
        .parse::<i32>()
        .map_err(|e| invalid("SCOUT_RESCORE_STALE_HOURS", e.to_string()))?;
    if rescore_stale_hours < 1 {
        return Err(invalid(
            "SCOUT_RESCORE_STALE_HOURS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        games_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        rescore_cron,
        rescore_stale_hours,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SCOUT_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
