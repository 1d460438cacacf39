use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default upstream origin for the `web_profile_info` endpoint.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://i.instagram.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("INSTALENS_ENV", "development"))?;
    let bind_addr = parse_addr("INSTALENS_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("INSTALENS_LOG_LEVEL", "info");

    let upstream_base_url = or_default("INSTALENS_UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL);
    if !(upstream_base_url.starts_with("http://") || upstream_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "INSTALENS_UPSTREAM_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{upstream_base_url}\""),
        });
    }

    let request_timeout_secs = parse_u64("INSTALENS_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "INSTALENS_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let snapshot_dir = lookup("INSTALENS_SNAPSHOT_DIR")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_base_url,
        request_timeout_secs,
        snapshot_dir,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INSTALENS_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
