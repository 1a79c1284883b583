use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Upstream origin, e.g. `https://orangesky.org.au`.
    pub base_url: String,
    /// Path of the page carrying the inline location directory block.
    pub directory_path: String,
    /// Path prefix of the per-id shift endpoint.
    pub shift_api_path: String,
    /// Path prefix of the per-location HTML list pages.
    pub list_path: String,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub probe_config_path: Option<PathBuf>,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Locations per progress batch on the API path.
    pub scraper_batch_size: usize,
    /// Delay after each per-id shift request.
    pub scraper_inter_request_delay_ms: u64,
    /// Delay after each generated slug probe.
    pub scraper_probe_delay_ms: u64,
    pub scraper_max_probe_attempts: usize,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
}

impl AppConfig {
    /// Absolute URL of the directory page.
    #[must_use]
    pub fn directory_url(&self) -> String {
        join_url(&self.base_url, &self.directory_path)
    }

    /// URL prefix for per-id shift requests; the id is appended as a final
    /// path segment.
    #[must_use]
    pub fn shift_api_url(&self) -> String {
        join_url(&self.base_url, &self.shift_api_path)
    }

    /// URL prefix for per-slug list pages.
    #[must_use]
    pub fn list_url(&self) -> String {
        join_url(&self.base_url, &self.list_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("directory_path", &self.directory_path)
            .field("shift_api_path", &self.shift_api_path)
            .field("list_path", &self.list_path)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .field("probe_config_path", &self.probe_config_path)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_batch_size", &self.scraper_batch_size)
            .field(
                "scraper_inter_request_delay_ms",
                &self.scraper_inter_request_delay_ms,
            )
            .field("scraper_probe_delay_ms", &self.scraper_probe_delay_ms)
            .field(
                "scraper_max_probe_attempts",
                &self.scraper_max_probe_attempts,
            )
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .finish()
    }
}
