use crate::app_config::{AppConfig, Environment};
use crate::scraped::{
    DEFAULT_BACKOFF_BASE_MS, DEFAULT_DELAY_BETWEEN_REQUESTS_MS, DEFAULT_GRID_SELECTOR,
    DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u32>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let database_url = lookup("DATABASE_URL").ok().filter(|v| !v.is_empty());
    let env = parse_environment(&or_default("GYMCAT_ENV", "development"))?;
    let log_level = or_default("GYMCAT_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("GYMCAT_DB_MAX_CONNECTIONS", 5)?;
    let db_min_connections = parse_u32("GYMCAT_DB_MIN_CONNECTIONS", 1)?;
    let db_acquire_timeout_secs = parse_u64("GYMCAT_DB_ACQUIRE_TIMEOUT_SECS", 10)?;

    let scraper_base_url = lookup("GYMCAT_BASE_URL").ok().filter(|v| !v.is_empty());
    let scraper_grid_selector = or_default("GYMCAT_GRID_SELECTOR", DEFAULT_GRID_SELECTOR);
    let scraper_user_agent = or_default("GYMCAT_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_timeout_ms = parse_u64("GYMCAT_SCRAPER_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
    let scraper_delay_ms = parse_u64(
        "GYMCAT_SCRAPER_DELAY_MS",
        DEFAULT_DELAY_BETWEEN_REQUESTS_MS,
    )?;
    let scraper_max_retries = parse_u32("GYMCAT_SCRAPER_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
    let scraper_backoff_base_ms =
        parse_u64("GYMCAT_SCRAPER_BACKOFF_BASE_MS", DEFAULT_BACKOFF_BASE_MS)?;

    if scraper_timeout_ms == 0 {
        return Err(invalid(
            "GYMCAT_SCRAPER_TIMEOUT_MS",
            "timeout must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        scraper_base_url,
        scraper_grid_selector,
        scraper_user_agent,
        scraper_timeout_ms,
        scraper_delay_ms,
        scraper_max_retries,
        scraper_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GYMCAT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
