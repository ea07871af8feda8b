//! Main Audiobookshelf client.

use crate::error::{AbsClientError, Result};
use crate::library::LibraryClient;
use crate::progress::ProgressClient;
use crate::types::AbsConfig;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Upper bound on the TCP connect phase; the overall timeout still applies
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Main client for interacting with an Audiobookshelf server.
///
/// Authentication is a static API key sent as a bearer token on every
/// request. Library and progress operations are exposed through short-lived
/// sub-clients borrowing the shared HTTP connection pool.
///
/// # Example
///
/// ```ignore
/// use shelfmark_abs_client::{AbsClient, AbsConfig};
///
/// let client = AbsClient::new(AbsConfig::new("http://localhost:13378", "key"))?;
/// let libraries = client.library().list_libraries().await?;
/// println!("Found {} libraries", libraries.len());
/// ```
pub struct AbsClient {
    http: Client,
    config: AbsConfig,
}

impl AbsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AbsConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(AbsClientError::InvalidConfig("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AbsClientError::InvalidConfig(
                "URL must start with http:// or https://".into(),
            ));
        }

        Url::parse(&url)
            .map_err(|e| AbsClientError::InvalidConfig(format!("invalid URL {}: {}", url, e)))?;

        if config.api_key.trim().is_empty() {
            return Err(AbsClientError::InvalidConfig(
                "API key cannot be empty".into(),
            ));
        }

        if config.page_size == 0 {
            return Err(AbsClientError::InvalidConfig(
                "page size must be at least 1".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .user_agent(format!("ShelfMark/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: AbsConfig { url, ..config },
        })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &AbsConfig {
        &self.config
    }

    /// Get a library client for listing libraries and items.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.config.url, &self.config.api_key)
    }

    /// Get a progress client for reading and updating the user's progress.
    pub fn progress(&self) -> ProgressClient<'_> {
        ProgressClient::new(&self.http, &self.config.url, &self.config.api_key)
    }
}

/// Turn a response into `T`, mapping auth and server failures.
///
/// The body is read in full before decoding, so a timeout or dropped
/// connection mid-body is reported as a transport failure rather than bad JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.bytes().await.map_err(AbsClientError::from_send)?;

    serde_json::from_slice(&body).map_err(|e| {
        AbsClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
    })
}

/// Pass successful responses through; map 401/403 and other failures to errors.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %error_text, "Request failed");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(AbsClientError::AuthFailed(format!(
            "server answered {} - check the API key",
            status.as_u16()
        )))
    } else {
        Err(AbsClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}

/// Join path segments onto the server URL, percent-encoding each one.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AbsClientError::InvalidConfig(format!("invalid URL {}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|()| AbsClientError::InvalidConfig(format!("{} cannot be a base URL", base_url)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(AbsClient::new(AbsConfig::new("https://example.com", "key")).is_ok());
        assert!(AbsClient::new(AbsConfig::new("http://localhost:13378", "key")).is_ok());

        // Invalid URLs
        assert!(AbsClient::new(AbsConfig::new("", "key")).is_err());
        assert!(AbsClient::new(AbsConfig::new("not-a-url", "key")).is_err());
        assert!(AbsClient::new(AbsConfig::new("ftp://example.com", "key")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client = AbsClient::new(AbsConfig::new("https://example.com/", "key")).unwrap();
        assert_eq!(client.url(), "https://example.com");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("http://localhost:13378", &["api", "me", "progress", "li 1/2"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:13378/api/me/progress/li%201%2F2");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = endpoint("https://example.com/abs", &["api", "libraries"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/abs/api/libraries");
    }

    #[test]
    fn test_api_key_required() {
        assert!(matches!(
            AbsClient::new(AbsConfig::new("https://example.com", "  ")),
            Err(AbsClientError::InvalidConfig(_))
        ));
    }
}
