//! HTTP client for the upstream directory page, shift API and list pages.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

/// Absolute URLs of the three upstream resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Page embedding the inline location block.
    pub directory_url: String,
    /// Prefix for `GET {shift_api_url}/{id}`.
    pub shift_api_url: String,
    /// Prefix for `GET {list_url}/{slug}`.
    pub list_url: String,
}

/// HTTP client shared by both pipelines.
///
/// Every request goes through [`retry_with_backoff`]; with `max_retries = 0`
/// each call issues exactly one request.
pub struct ShiftSourceClient {
    client: Client,
    endpoints: Endpoints,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl ShiftSourceClient {
    /// Creates a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoints: Endpoints,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoints,
            max_retries,
            backoff_base_secs,
        })
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches the directory page body.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-success status.
    pub async fn fetch_directory_page(&self) -> Result<String, ScraperError> {
        let url = self.endpoints.directory_url.clone();
        self.get_text(&url).await
    }

    /// Fetches the raw shift objects published for one source id.
    ///
    /// A JSON array is returned element by element; a lone object counts as a
    /// one-element array; any other JSON value yields nothing.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`] / [`ScraperError::UnexpectedStatus`] for
    ///   non-success responses.
    /// - [`ScraperError::Deserialize`] when the body is not JSON.
    /// - [`ScraperError::Http`] / [`ScraperError::RateLimited`] after retries.
    pub async fn fetch_shift_payloads(
        &self,
        source_id: &str,
    ) -> Result<Vec<serde_json::Value>, ScraperError> {
        let url = endpoint_url(&self.endpoints.shift_api_url, source_id)?;
        let body = self.get_text(&url).await?;
        let value = serde_json::from_str::<serde_json::Value>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("shifts for source id {source_id}"),
                source: e,
            }
        })?;

        Ok(match value {
            serde_json::Value::Array(items) => items,
            obj @ serde_json::Value::Object(_) => vec![obj],
            _ => Vec::new(),
        })
    }

    /// Fetches the list page for `slug`.
    ///
    /// Returns `Ok(None)` when upstream answers with the slug itself, which is
    /// how it signals a location that does not exist.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-success status.
    pub async fn fetch_list_page(&self, slug: &str) -> Result<Option<String>, ScraperError> {
        let url = endpoint_url(&self.endpoints.list_url, slug)?;
        let body = self.get_text(&url).await?;
        if body.trim() == slug {
            return Ok(None);
        }
        Ok(Some(body))
    }

    async fn get_text(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.client.get(url).send().await?;
            let response = check_status(response, url)?;
            Ok::<_, ScraperError>(response.text().await?)
        })
        .await
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, ScraperError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ScraperError::RateLimited {
            url: url.to_owned(),
            retry_after_secs,
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response)
}

/// Appends `segment` to `prefix` as a single, percent-encoded path segment.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `prefix` is not an absolute
/// URL that can carry path segments.
fn endpoint_url(prefix: &str, segment: &str) -> Result<String, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidBaseUrl {
        url: prefix.to_owned(),
        reason,
    };

    let mut url = reqwest::Url::parse(prefix).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("URL cannot be a base".to_owned()))?
        .pop_if_empty()
        .push(segment);
    Ok(url.to_string())
}
