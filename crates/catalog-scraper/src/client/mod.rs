//! HTTP client for the paginated catalog listing.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Timeout applied when no explicit setting is provided.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Construction parameters for [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: catalog_core::config::DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn from_app_config(config: &catalog_core::AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Fetches listing pages with a browser-like identity and a bounded timeout.
///
/// Failures are classified into timeout, HTTP status, transport and other.
/// [`CatalogClient::try_fetch_page`] returns the classified error;
/// [`CatalogClient::fetch_page`] logs it and yields `None`. No request is
/// ever retried.
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(settings: &ClientSettings) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns its body, logging and swallowing any failure.
    pub async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.try_fetch_page(url).await {
            Ok(body) => Some(body),
            Err(err) => {
                log_fetch_failure(url, &err);
                None
            }
        }
    }

    /// Fetches `url` and returns its body on any 2xx status.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Timeout`]: the request exceeded the client timeout.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Transport`]: connection, TLS or body read failure.
    /// - [`ScraperError::Other`]: anything else, including unusable URLs.
    pub async fn try_fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

/// Maps a `reqwest` failure onto the fetch taxonomy.
fn classify(url: &str, err: reqwest::Error) -> ScraperError {
    let url = url.to_owned();
    if err.is_timeout() {
        ScraperError::Timeout { url, source: err }
    } else if err.is_connect() || err.is_request() || err.is_body() || err.is_decode() {
        ScraperError::Transport { url, source: err }
    } else if let Some(status) = err.status() {
        ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        }
    } else {
        ScraperError::Other {
            url,
            reason: err.to_string(),
        }
    }
}

pub(crate) fn log_fetch_failure(url: &str, err: &ScraperError) {
    match err {
        ScraperError::Timeout { .. } => {
            tracing::error!(url, error = %err, "timeout fetching page");
        }
        ScraperError::UnexpectedStatus { status, .. } => {
            tracing::error!(url, status, "HTTP error fetching page");
        }
        ScraperError::Transport { .. } => {
            tracing::error!(url, error = %err, "network error fetching page");
        }
        ScraperError::Http(_) | ScraperError::Other { .. } => {
            tracing::error!(url, error = %err, "unexpected error fetching page");
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
