use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://fashion-studio.dicoding.dev";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

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
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("CATALOG_LOG_LEVEL", "info");

    let base_url = or_default("CATALOG_BASE_URL", DEFAULT_BASE_URL);
    let max_pages = parse_usize("CATALOG_MAX_PAGES", "50")?;
    let request_timeout_secs = parse_u64("CATALOG_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("CATALOG_USER_AGENT", DEFAULT_USER_AGENT);
    let page_delay_ms = parse_u64("CATALOG_PAGE_DELAY_MS", "1000")?;
    let exchange_rate = parse_exchange_rate(&or_default("CATALOG_EXCHANGE_RATE", "16000"))?;

    let csv_path = PathBuf::from(or_default("CATALOG_CSV_PATH", "products.csv"));

    let database_url = optional("DATABASE_URL");
    let db_table = or_default("CATALOG_DB_TABLE", "products");
    let db_max_connections = parse_u32("CATALOG_DB_MAX_CONNECTIONS", "5")?;
    let db_acquire_timeout_secs = parse_u64("CATALOG_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let sheets_spreadsheet_id = optional("CATALOG_SHEETS_SPREADSHEET_ID");
    let sheets_credentials_path = PathBuf::from(or_default(
        "CATALOG_SHEETS_CREDENTIALS",
        "google-sheets-api.json",
    ));

    Ok(AppConfig {
        log_level,
        base_url,
        max_pages,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        exchange_rate,
        csv_path,
        database_url,
        db_table,
        db_max_connections,
        db_acquire_timeout_secs,
        sheets_spreadsheet_id,
        sheets_credentials_path,
    })
}

fn parse_exchange_rate(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "CATALOG_EXCHANGE_RATE".to_string(),
        reason,
    };
    let rate = raw.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(invalid(format!("must be a positive finite number, got {raw}")));
    }
    Ok(rate)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
