use thiserror::Error;

/// Transport-level failures talking to the upstream content system.
///
/// The orchestrator and slug prober absorb these per request; only the
/// directory fetch lets one escape (wrapped in [`DirectoryError::Fetch`]).
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Fatal failures resolving the location directory. Any of these aborts the
/// API pipeline.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to fetch location directory: {0}")]
    Fetch(#[from] ScraperError),

    #[error("could not find location data in directory page: {reason}")]
    Parse { reason: &'static str },

    /// The block was found but is not a well-formed array of flat records.
    /// `raw` holds the captured text for offline inspection.
    #[error("failed to decode location directory block: {reason}")]
    Decode { reason: String, raw: String },
}
