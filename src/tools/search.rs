//! brave_search tool implementation.

use reqwest::header::{ACCEPT, ACCEPT_ENCODING, HeaderMap, HeaderName, HeaderValue};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::error::WebError;
use crate::http::HttpClient;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Returned when the upstream response holds no results.
pub const NO_RESULTS: &str = "No web search results found.";

/// Header carrying the Brave subscription token.
const SUBSCRIPTION_TOKEN_HEADER: &str = "x-subscription-token";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Input for the brave_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchInput {
    /// The search query string.
    pub query: String,
}

/// One rendered search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Web search backed by the Brave Search API.
#[derive(Debug, Clone)]
pub struct SearchTool {
    http: HttpClient,
    api_key: Option<String>,
    endpoint: String,
    max_results: usize,
}

/// Brave Search API response.
#[derive(Debug, Deserialize)]
struct BraveSearchResponse {
    web: Option<BraveWebResults>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResults {
    results: Option<Vec<BraveResult>>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl SearchTool {
    pub fn new(config: &Config, http: HttpClient) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: config.search_endpoint.clone(),
            max_results: config.max_search_results,
        }
    }

    /// Run a search and render the outcome. Never fails; errors become text.
    pub async fn search(&self, query: &str) -> String {
        match self.run(query).await {
            Ok(text) => text,
            Err(WebError::ConfigurationMissing) => {
                format!("Error: {}", WebError::ConfigurationMissing)
            }
            Err(WebError::Shape(detail)) => {
                tracing::debug!(%detail, "search response had no result list");
                NO_RESULTS.to_string()
            }
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "web search failed");
                format!("Error performing search: {err}")
            }
        }
    }

    async fn run(&self, query: &str) -> Result<String, WebError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WebError::ConfigurationMissing)?;

        let url = build_search_url(&self.endpoint, query, self.max_results)?;

        let mut token = HeaderValue::from_str(api_key)
            .map_err(|_| WebError::Unexpected("API key is not a valid header value".into()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(HeaderName::from_static(SUBSCRIPTION_TOKEN_HEADER), token);

        let response = self.http.get(url.as_str(), Some(headers)).await?;
        let results = parse_results(&response.body)?;

        tracing::debug!(count = results.len(), "search returned results");
        Ok(format_results(&results, self.max_results))
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Build the endpoint URL with `q` and `count` query parameters.
fn build_search_url(endpoint: &str, query: &str, count: usize) -> Result<Url, WebError> {
    let count = count.to_string();
    Url::parse_with_params(endpoint, &[("q", query), ("count", count.as_str())])
        .map_err(|e| WebError::InvalidUrl(format!("{endpoint}: {e}")))
}

/// Pull result items out of a Brave response body.
///
/// A missing `web` or `web.results` key is a [`WebError::Shape`]; malformed
/// JSON is [`WebError::Unexpected`].
fn parse_results(body: &str) -> Result<Vec<SearchResultItem>, WebError> {
    let data: BraveSearchResponse = serde_json::from_str(body)
        .map_err(|e| WebError::Unexpected(format!("invalid search response: {e}")))?;

    let results = data
        .web
        .ok_or_else(|| WebError::Shape("missing `web` object".into()))?
        .results
        .ok_or_else(|| WebError::Shape("missing `web.results` array".into()))?;

    Ok(results
        .into_iter()
        .map(|r| SearchResultItem {
            title: r.title.unwrap_or_else(|| "No Title".into()),
            url: r.url.unwrap_or_else(|| "#".into()),
            snippet: r.description.unwrap_or_else(|| "No Snippet".into()),
        })
        .collect())
}

/// Render at most `limit` results as a numbered list.
fn format_results(results: &[SearchResultItem], limit: usize) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut lines = vec!["Search Results:".to_string()];
    lines.extend(results.iter().take(limit).enumerate().map(|(i, r)| {
        format!(
            "{}. {}\n   URL: {}\n   Snippet: {}\n",
            i + 1,
            r.title,
            r.url,
            r.snippet
        )
    }));
    lines.join("\n")
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> SearchResultItem {
        SearchResultItem {
            title: format!("Title {n}"),
            url: format!("https://example.com/{n}"),
            snippet: format!("Snippet {n}"),
        }
    }

    #[test]
    fn test_build_search_url_encodes_query() {
        let url = build_search_url(
            "https://api.search.brave.com/res/v1/web/search",
            "rust & tokio",
            5,
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "rust & tokio".to_string()),
                ("count".to_string(), "5".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_results_missing_web_is_shape_error() {
        let err = parse_results(r#"{"query": {"original": "x"}}"#).unwrap_err();
        assert_eq!(err.code(), "SHAPE_ERROR");

        let err = parse_results(r#"{"web": {}}"#).unwrap_err();
        assert_eq!(err.code(), "SHAPE_ERROR");
    }

    #[test]
    fn test_parse_results_invalid_json() {
        let err = parse_results("<html>nope</html>").unwrap_err();
        assert_eq!(err.code(), "UNEXPECTED_ERROR");
    }

    #[test]
    fn test_parse_results_placeholders() {
        let results = parse_results(r#"{"web": {"results": [{}, {"title": "T"}]}}"#).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "No Title");
        assert_eq!(results[0].url, "#");
        assert_eq!(results[0].snippet, "No Snippet");
        assert_eq!(results[1].title, "T");
    }

    #[test]
    fn test_format_results_empty() {
        assert_eq!(format_results(&[], 5), NO_RESULTS);
    }

    #[test]
    fn test_format_results_layout() {
        let text = format_results(&[item(1), item(2)], 5);
        assert_eq!(
            text,
            "Search Results:\n\
             1. Title 1\n   URL: https://example.com/1\n   Snippet: Snippet 1\n\n\
             2. Title 2\n   URL: https://example.com/2\n   Snippet: Snippet 2\n"
        );
    }

    #[test]
    fn test_format_results_applies_limit() {
        let results: Vec<_> = (1..=8).map(item).collect();
        let text = format_results(&results, 5);
        assert!(text.contains("5. Title 5"));
        assert!(!text.contains("6. Title 6"));
        assert_eq!(text.matches("   URL: ").count(), 5);
    }

    #[tokio::test]
    async fn test_search_without_key() {
        let config = Config::default();
        let tool = SearchTool::new(&config, HttpClient::new(&config).unwrap());
        assert_eq!(
            tool.search("anything").await,
            "Error: Brave Search API key (BRAVE_API_KEY) is not configured."
        );
    }
}
