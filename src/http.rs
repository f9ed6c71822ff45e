//! Outbound HTTP GET with a default user agent, fixed timeout and failure classification.

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::Config;
use crate::error::WebError;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 10;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Thin wrapper around a shared [`reqwest::Client`].
///
/// Idle connections are not pooled, so the connection opened for an
/// invocation is closed once that invocation's response has been read.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: HeaderValue,
}

/// A successful (2xx) response with its body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,

    /// Response body decoded as text.
    pub body: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl HttpClient {
    /// Build a client from the timeout and user agent in `config`.
    pub fn new(config: &Config) -> Result<Self, WebError> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| WebError::Unexpected(format!("invalid user agent: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| WebError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, user_agent })
    }

    /// Issue a GET to `url` with the default user agent merged into `headers`.
    pub async fn get(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
    ) -> Result<HttpResponse, WebError> {
        let target = parse_url(url)?;
        let headers = merge_headers(&self.user_agent, headers);

        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(target)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                let err = WebError::network(url, e);
                tracing::warn!(%url, error = %err, "HTTP request failed");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "HTTP status error");
            return Err(WebError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| WebError::network(url, e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpResponse {
    /// The declared `Content-Type`, if present and valid ASCII.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Parse `url` and reject anything that is not HTTP(S).
fn parse_url(url: &str) -> Result<Url, WebError> {
    let parsed = Url::parse(url).map_err(|e| WebError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(WebError::InvalidUrl(format!("unsupported scheme: {scheme}"))),
    }
}

/// Add the default user agent unless the caller set one.
fn merge_headers(user_agent: &HeaderValue, headers: Option<HeaderMap>) -> HeaderMap {
    let mut headers = headers.unwrap_or_default();
    headers.entry(USER_AGENT).or_insert_with(|| user_agent.clone());
    headers
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
