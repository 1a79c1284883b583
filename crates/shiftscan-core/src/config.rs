use crate::app_config::AppConfig;
use crate::ConfigError;

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
/// Every variable has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let base_url = or_default("SHIFTSCAN_BASE_URL", "https://orangesky.org.au");
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid(
            "SHIFTSCAN_BASE_URL",
            "must start with http:// or https://".to_string(),
        ));
    }

    let directory_path = or_default("SHIFTSCAN_DIRECTORY_PATH", "/map/");
    let shift_api_path = or_default(
        "SHIFTSCAN_SHIFT_API_PATH",
        "/wp-json/knd_rostify/v1/shifts",
    );
    let list_path = or_default("SHIFTSCAN_LIST_PATH", "/list");
    let output_dir = PathBuf::from(or_default("SHIFTSCAN_OUTPUT_DIR", "."));
    let log_level = or_default("SHIFTSCAN_LOG_LEVEL", "info");
    let probe_config_path = lookup("SHIFTSCAN_PROBE_CONFIG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let scraper_request_timeout_secs = parse_u64("SHIFTSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "SHIFTSCAN_USER_AGENT",
        "shiftscan/0.1 (shift-directory)",
    );

    let scraper_batch_size = parse_usize("SHIFTSCAN_BATCH_SIZE", "3")?;
    if scraper_batch_size == 0 {
        return Err(invalid(
            "SHIFTSCAN_BATCH_SIZE",
            "must be greater than zero".to_string(),
        ));
    }

    let scraper_inter_request_delay_ms = parse_u64("SHIFTSCAN_INTER_REQUEST_DELAY_MS", "100")?;
    let scraper_probe_delay_ms = parse_u64("SHIFTSCAN_PROBE_DELAY_MS", "50")?;
    let scraper_max_probe_attempts = parse_usize("SHIFTSCAN_MAX_PROBE_ATTEMPTS", "500")?;
    let scraper_max_retries = parse_u32("SHIFTSCAN_MAX_RETRIES", "0")?;
    let scraper_retry_backoff_base_secs = parse_u64("SHIFTSCAN_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        base_url,
        directory_path,
        shift_api_path,
        list_path,
        output_dir,
        log_level,
        probe_config_path,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_batch_size,
        scraper_inter_request_delay_ms,
        scraper_probe_delay_ms,
        scraper_max_probe_attempts,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
