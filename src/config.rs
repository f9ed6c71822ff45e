//! Configuration for the web utilities MCP server.

use std::time::Duration;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// User-Agent header sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str =
    "MCPWebUtilServer/1.0 (LanguageModelIntegration; +https://modelcontextprotocol.io)";

/// Brave Search web endpoint.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

/// Default number of search results requested and rendered.
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 5;

/// Default character budget for extracted page text.
pub const DEFAULT_MAX_FETCH_CHARS: usize = 500_000;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Environment variable holding the Brave Search credential.
pub const API_KEY_ENV: &str = "BRAVE_API_KEY";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Process-wide configuration, built once at startup and handed to each tool.
#[derive(Debug, Clone)]
pub struct Config {
    /// Brave Search subscription token. `None` disables the search tool.
    pub api_key: Option<String>,

    /// User-Agent sent unless the caller overrides it.
    pub user_agent: String,

    /// Maximum number of search results requested and rendered.
    pub max_search_results: usize,

    /// Maximum number of characters of page text returned by fetch.
    pub max_fetch_chars: usize,

    /// Search API endpoint.
    pub search_endpoint: String,

    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Config {
    /// Set the API credential. Blank values are treated as absent.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        self
    }

    /// Whether a search credential is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.into(),
            max_search_results: DEFAULT_MAX_SEARCH_RESULTS,
            max_fetch_chars: DEFAULT_MAX_FETCH_CHARS,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
